// Text canonicalization: cleaning scraped strings and building comparison keys

pub mod clean;
pub mod normalize;
pub mod prefectures;

pub use clean::{clean_text, sanitize_record};
pub use normalize::{
    are_strings_similar, clean_separators, get_event_base_name, normalize_event_name,
    normalize_location, normalize_venue, similarity_key, strip_symbols,
};

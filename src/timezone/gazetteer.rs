use once_cell::sync::Lazy;
use std::collections::HashMap;

/// One city entry in the embedded gazetteer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct City {
    pub name: &'static str,
    pub country: &'static str,
    pub iso2: &'static str,
    pub iso3: &'static str,
    pub province: &'static str,
    pub population: u32,
    pub zone: &'static str,
}

const fn city(
    name: &'static str,
    country: &'static str,
    iso2: &'static str,
    iso3: &'static str,
    province: &'static str,
    population: u32,
    zone: &'static str,
) -> City {
    City {
        name,
        country,
        iso2,
        iso3,
        province,
        population,
        zone,
    }
}

/// Cities that touring acts commonly list outside Japan. Duplicated names
/// (London, Portland, Paris, ...) are deliberate: scoring picks between them.
pub const CITIES: &[City] = &[
    // East Asia
    city("Seoul", "South Korea", "KR", "KOR", "Seoul", 9_776_000, "Asia/Seoul"),
    city("Busan", "South Korea", "KR", "KOR", "Busan", 3_429_000, "Asia/Seoul"),
    city("Incheon", "South Korea", "KR", "KOR", "Incheon", 2_957_000, "Asia/Seoul"),
    city("Taipei", "Taiwan", "TW", "TWN", "Taipei", 2_646_000, "Asia/Taipei"),
    city("Kaohsiung", "Taiwan", "TW", "TWN", "Kaohsiung", 2_773_000, "Asia/Taipei"),
    city("Hong Kong", "Hong Kong", "HK", "HKG", "", 7_482_000, "Asia/Hong_Kong"),
    city("Macau", "Macao", "MO", "MAC", "", 682_000, "Asia/Macau"),
    city("Shanghai", "China", "CN", "CHN", "Shanghai", 24_870_000, "Asia/Shanghai"),
    city("Beijing", "China", "CN", "CHN", "Beijing", 21_540_000, "Asia/Shanghai"),
    city("Guangzhou", "China", "CN", "CHN", "Guangdong", 18_676_000, "Asia/Shanghai"),
    city("Shenzhen", "China", "CN", "CHN", "Guangdong", 17_560_000, "Asia/Shanghai"),
    city("Chengdu", "China", "CN", "CHN", "Sichuan", 16_330_000, "Asia/Shanghai"),
    city("Ulaanbaatar", "Mongolia", "MN", "MNG", "", 1_645_000, "Asia/Ulaanbaatar"),
    // Southeast and South Asia
    city("Bangkok", "Thailand", "TH", "THA", "Bangkok", 10_539_000, "Asia/Bangkok"),
    city("Singapore", "Singapore", "SG", "SGP", "", 5_686_000, "Asia/Singapore"),
    city("Kuala Lumpur", "Malaysia", "MY", "MYS", "Kuala Lumpur", 1_982_000, "Asia/Kuala_Lumpur"),
    city("Jakarta", "Indonesia", "ID", "IDN", "Jakarta", 10_562_000, "Asia/Jakarta"),
    city("Bali", "Indonesia", "ID", "IDN", "Bali", 4_317_000, "Asia/Makassar"),
    city("Manila", "Philippines", "PH", "PHL", "Metro Manila", 1_846_000, "Asia/Manila"),
    city("Quezon City", "Philippines", "PH", "PHL", "Metro Manila", 2_960_000, "Asia/Manila"),
    city("Ho Chi Minh City", "Vietnam", "VN", "VNM", "", 8_993_000, "Asia/Ho_Chi_Minh"),
    city("Hanoi", "Vietnam", "VN", "VNM", "", 8_054_000, "Asia/Bangkok"),
    city("Mumbai", "India", "IN", "IND", "Maharashtra", 12_442_000, "Asia/Kolkata"),
    city("New Delhi", "India", "IN", "IND", "Delhi", 16_787_000, "Asia/Kolkata"),
    city("Bangalore", "India", "IN", "IND", "Karnataka", 8_443_000, "Asia/Kolkata"),
    // Middle East
    city("Dubai", "United Arab Emirates", "AE", "ARE", "Dubai", 3_331_000, "Asia/Dubai"),
    city("Abu Dhabi", "United Arab Emirates", "AE", "ARE", "Abu Dhabi", 1_483_000, "Asia/Dubai"),
    city("Tel Aviv", "Israel", "IL", "ISR", "", 460_000, "Asia/Jerusalem"),
    city("Istanbul", "Turkey", "TR", "TUR", "Istanbul", 15_462_000, "Europe/Istanbul"),
    // Oceania
    city("Sydney", "Australia", "AU", "AUS", "New South Wales", 5_312_000, "Australia/Sydney"),
    city("Melbourne", "Australia", "AU", "AUS", "Victoria", 5_078_000, "Australia/Melbourne"),
    city("Brisbane", "Australia", "AU", "AUS", "Queensland", 2_560_000, "Australia/Brisbane"),
    city("Perth", "Australia", "AU", "AUS", "Western Australia", 2_085_000, "Australia/Perth"),
    city("Perth", "United Kingdom", "GB", "GBR", "Scotland", 47_000, "Europe/London"),
    city("Adelaide", "Australia", "AU", "AUS", "South Australia", 1_376_000, "Australia/Adelaide"),
    city("Auckland", "New Zealand", "NZ", "NZL", "Auckland", 1_657_000, "Pacific/Auckland"),
    city("Wellington", "New Zealand", "NZ", "NZL", "Wellington", 215_000, "Pacific/Auckland"),
    city("Honolulu", "United States", "US", "USA", "Hawaii", 350_000, "Pacific/Honolulu"),
    // Europe
    city("London", "United Kingdom", "GB", "GBR", "England", 8_982_000, "Europe/London"),
    city("Manchester", "United Kingdom", "GB", "GBR", "England", 553_000, "Europe/London"),
    city("Glasgow", "United Kingdom", "GB", "GBR", "Scotland", 635_000, "Europe/London"),
    city("Birmingham", "United Kingdom", "GB", "GBR", "England", 1_141_000, "Europe/London"),
    city("Birmingham", "United States", "US", "USA", "Alabama", 200_000, "America/Chicago"),
    city("Dublin", "Ireland", "IE", "IRL", "Leinster", 1_173_000, "Europe/Dublin"),
    city("Paris", "France", "FR", "FRA", "Ile-de-France", 2_161_000, "Europe/Paris"),
    city("Paris", "United States", "US", "USA", "Texas", 25_000, "America/Chicago"),
    city("Lyon", "France", "FR", "FRA", "Auvergne-Rhone-Alpes", 516_000, "Europe/Paris"),
    city("Berlin", "Germany", "DE", "DEU", "Berlin", 3_645_000, "Europe/Berlin"),
    city("Hamburg", "Germany", "DE", "DEU", "Hamburg", 1_841_000, "Europe/Berlin"),
    city("Munich", "Germany", "DE", "DEU", "Bavaria", 1_472_000, "Europe/Berlin"),
    city("Cologne", "Germany", "DE", "DEU", "North Rhine-Westphalia", 1_086_000, "Europe/Berlin"),
    city("Amsterdam", "Netherlands", "NL", "NLD", "North Holland", 872_000, "Europe/Amsterdam"),
    city("Brussels", "Belgium", "BE", "BEL", "Brussels", 1_209_000, "Europe/Brussels"),
    city("Madrid", "Spain", "ES", "ESP", "Madrid", 3_223_000, "Europe/Madrid"),
    city("Barcelona", "Spain", "ES", "ESP", "Catalonia", 1_620_000, "Europe/Madrid"),
    city("Lisbon", "Portugal", "PT", "PRT", "Lisbon", 545_000, "Europe/Lisbon"),
    city("Milan", "Italy", "IT", "ITA", "Lombardy", 1_352_000, "Europe/Rome"),
    city("Rome", "Italy", "IT", "ITA", "Lazio", 2_873_000, "Europe/Rome"),
    city("Zurich", "Switzerland", "CH", "CHE", "Zurich", 415_000, "Europe/Zurich"),
    city("Vienna", "Austria", "AT", "AUT", "Vienna", 1_897_000, "Europe/Vienna"),
    city("Prague", "Czech Republic", "CZ", "CZE", "Prague", 1_309_000, "Europe/Prague"),
    city("Warsaw", "Poland", "PL", "POL", "Masovia", 1_790_000, "Europe/Warsaw"),
    city("Budapest", "Hungary", "HU", "HUN", "", 1_752_000, "Europe/Budapest"),
    city("Copenhagen", "Denmark", "DK", "DNK", "Capital Region", 794_000, "Europe/Copenhagen"),
    city("Stockholm", "Sweden", "SE", "SWE", "Stockholm", 975_000, "Europe/Stockholm"),
    city("Oslo", "Norway", "NO", "NOR", "Oslo", 697_000, "Europe/Oslo"),
    city("Helsinki", "Finland", "FI", "FIN", "Uusimaa", 656_000, "Europe/Helsinki"),
    city("Athens", "Greece", "GR", "GRC", "Attica", 664_000, "Europe/Athens"),
    city("Athens", "United States", "US", "USA", "Georgia", 127_000, "America/New_York"),
    city("Moscow", "Russia", "RU", "RUS", "Moscow", 12_506_000, "Europe/Moscow"),
    city("Saint Petersburg", "Russia", "RU", "RUS", "", 5_384_000, "Europe/Moscow"),
    // North America
    city("New York", "United States", "US", "USA", "New York", 8_336_000, "America/New_York"),
    city("Brooklyn", "United States", "US", "USA", "New York", 2_736_000, "America/New_York"),
    city("Boston", "United States", "US", "USA", "Massachusetts", 675_000, "America/New_York"),
    city("Philadelphia", "United States", "US", "USA", "Pennsylvania", 1_603_000, "America/New_York"),
    city("Washington", "United States", "US", "USA", "District of Columbia", 689_000, "America/New_York"),
    city("Atlanta", "United States", "US", "USA", "Georgia", 498_000, "America/New_York"),
    city("Miami", "United States", "US", "USA", "Florida", 442_000, "America/New_York"),
    city("Chicago", "United States", "US", "USA", "Illinois", 2_746_000, "America/Chicago"),
    city("Houston", "United States", "US", "USA", "Texas", 2_304_000, "America/Chicago"),
    city("Dallas", "United States", "US", "USA", "Texas", 1_304_000, "America/Chicago"),
    city("Austin", "United States", "US", "USA", "Texas", 961_000, "America/Chicago"),
    city("Nashville", "United States", "US", "USA", "Tennessee", 689_000, "America/Chicago"),
    city("Denver", "United States", "US", "USA", "Colorado", 715_000, "America/Denver"),
    city("Phoenix", "United States", "US", "USA", "Arizona", 1_608_000, "America/Phoenix"),
    city("Las Vegas", "United States", "US", "USA", "Nevada", 641_000, "America/Los_Angeles"),
    city("Los Angeles", "United States", "US", "USA", "California", 3_898_000, "America/Los_Angeles"),
    city("San Francisco", "United States", "US", "USA", "California", 873_000, "America/Los_Angeles"),
    city("Oakland", "United States", "US", "USA", "California", 440_000, "America/Los_Angeles"),
    city("San Diego", "United States", "US", "USA", "California", 1_386_000, "America/Los_Angeles"),
    city("Seattle", "United States", "US", "USA", "Washington", 737_000, "America/Los_Angeles"),
    city("Portland", "United States", "US", "USA", "Oregon", 652_000, "America/Los_Angeles"),
    city("Portland", "United States", "US", "USA", "Maine", 68_000, "America/New_York"),
    city("Toronto", "Canada", "CA", "CAN", "Ontario", 2_794_000, "America/Toronto"),
    city("London", "Canada", "CA", "CAN", "Ontario", 422_000, "America/Toronto"),
    city("Montreal", "Canada", "CA", "CAN", "Quebec", 1_762_000, "America/Toronto"),
    city("Vancouver", "Canada", "CA", "CAN", "British Columbia", 662_000, "America/Vancouver"),
    city("Mexico City", "Mexico", "MX", "MEX", "", 9_209_000, "America/Mexico_City"),
    // South America
    city("Sao Paulo", "Brazil", "BR", "BRA", "Sao Paulo", 12_325_000, "America/Sao_Paulo"),
    city("Rio de Janeiro", "Brazil", "BR", "BRA", "Rio de Janeiro", 6_748_000, "America/Sao_Paulo"),
    city("Buenos Aires", "Argentina", "AR", "ARG", "", 3_075_000, "America/Argentina/Buenos_Aires"),
    city("Santiago", "Chile", "CL", "CHL", "Santiago Metropolitan", 6_257_000, "America/Santiago"),
    city("Lima", "Peru", "PE", "PER", "Lima", 9_752_000, "America/Lima"),
    city("Bogota", "Colombia", "CO", "COL", "", 7_181_000, "America/Bogota"),
];

/// Country abbreviations sources use that are not ISO codes
pub const COUNTRY_ALIASES: [(&str, &str); 5] = [
    ("UK", "GB"),
    ("USA", "US"),
    ("UAE", "AE"),
    ("KOREA", "KR"),
    ("RUSSIA", "RU"),
];

/// US state and Canadian province postal codes, so "Portland, OR" scores its province
pub const PROVINCE_CODES: [(&str, &str); 24] = [
    ("AL", "Alabama"),
    ("AZ", "Arizona"),
    ("CA", "California"),
    ("CO", "Colorado"),
    ("DC", "District of Columbia"),
    ("FL", "Florida"),
    ("GA", "Georgia"),
    ("HI", "Hawaii"),
    ("IL", "Illinois"),
    ("MA", "Massachusetts"),
    ("ME", "Maine"),
    ("NV", "Nevada"),
    ("NY", "New York"),
    ("OR", "Oregon"),
    ("PA", "Pennsylvania"),
    ("TN", "Tennessee"),
    ("TX", "Texas"),
    ("WA", "Washington"),
    ("ON", "Ontario"),
    ("QC", "Quebec"),
    ("BC", "British Columbia"),
    ("NSW", "New South Wales"),
    ("VIC", "Victoria"),
    ("QLD", "Queensland"),
];

static BY_NAME: Lazy<HashMap<String, Vec<&'static City>>> = Lazy::new(|| {
    let mut index: HashMap<String, Vec<&'static City>> = HashMap::new();
    for entry in CITIES {
        index.entry(entry.name.to_lowercase()).or_default().push(entry);
    }
    index
});

/// All gazetteer cities with this name (case-insensitive)
pub fn lookup(name: &str) -> &'static [&'static City] {
    BY_NAME
        .get(&name.trim().to_lowercase())
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

pub fn resolve_country_alias(code: &str) -> &str {
    COUNTRY_ALIASES
        .iter()
        .find(|(alias, _)| *alias == code)
        .map(|(_, iso)| *iso)
        .unwrap_or(code)
}

pub fn province_for_code(code: &str) -> Option<&'static str> {
    PROVINCE_CODES
        .iter()
        .find(|(abbr, _)| *abbr == code)
        .map(|(_, province)| *province)
}

use anyhow::Result;
use chrono::{TimeZone, Utc};
use serde_json::json;
use std::sync::Arc;
use tempfile::tempdir;

use gig_grouper::app::GroupingUseCase;
use gig_grouper::config::Config;
use gig_grouper::infra::{GroupedOutputAdapter, JsonRecordSource, OutputFormat};
use gig_grouper::GroupedEvent;

#[tokio::test]
async fn test_end_to_end_grouping_run() -> Result<()> {
    let temp_dir = tempdir()?;
    let input_path = temp_dir.path().join("records.json");
    let output_dir = temp_dir.path().join("out");

    let input = json!([
        {"id": "e1", "event_names": ["Rock &amp; Roll Night"], "venues": ["Shibuya\u{a0}O-EAST"],
         "locations": ["東京都"], "dates": ["2026-04-02"], "times": ["19:00"],
         "url": "https://eplus.example/1"},
        {"id": "p1", "event_names": ["ROCK & ROLL NIGHT"], "venues": ["shibuya o-east"],
         "locations": ["Tokyo"], "dates": ["2026-04-02"], "url": "https://pia.example/1"},
        {"id": "dup", "event_names": ["Rock & Roll Night"], "dates": ["2026-04-02"],
         "url": "https://eplus.example/1"},
        {"id": "nodate", "event_names": ["Mystery"], "dates": ["\u{200b}"],
         "url": "https://eplus.example/2"},
        {"id": "old", "event_names": ["Last Year"], "dates": ["2025-12-01"],
         "url": "https://eplus.example/3"},
        {"id": "ldn", "event_names": ["London Date"], "venues": ["O2 Academy Brixton"],
         "locations": ["London, UK"], "dates": ["2026-03-01"], "times": ["19:30:00"],
         "url": "https://tour.example/ldn"}
    ]);
    std::fs::write(&input_path, serde_json::to_string(&input)?)?;

    let mut config = Config::default();
    config.output.dir = output_dir.clone();

    let source = Arc::new(JsonRecordSource::new(input_path));
    let sink = Arc::new(GroupedOutputAdapter::new(
        output_dir,
        OutputFormat::Json { pretty: true },
    ));
    let use_case = GroupingUseCase::new(source, sink, config);

    // 2026-03-01 20:00 in Tokyo, 11:00 in London
    let now = Utc.with_ymd_and_hms(2026, 3, 1, 11, 0, 0).unwrap();
    let result = use_case.run(now).await?;

    assert_eq!(result.records_loaded, 6);
    assert_eq!(result.records_rejected, 1);
    assert_eq!(result.duplicate_urls, 1);
    assert_eq!(result.past_clusters_dropped, 1);
    assert_eq!(result.clusters, 2);

    let written: Vec<GroupedEvent> =
        serde_json::from_str(&std::fs::read_to_string(&result.output)?)?;
    assert_eq!(written.len(), 2);

    // Earliest remaining date sorts first
    assert_eq!(written[0].id, "ldn");
    assert_eq!(written[0].display_dates, vec!["2026-03-01T19:30:00"]);

    let rock = &written[1];
    assert_eq!(rock.display_names, vec!["Rock & Roll Night"]);
    assert_eq!(rock.source_events.len(), 2);
    // The untimed listing sorts ahead of the timed one and seeds the cluster
    assert_eq!(rock.id, "p1");
    assert_eq!(rock.venues, vec!["shibuya o-east", "Shibuya O-EAST"]);
    assert_eq!(rock.time.as_deref(), Some("19:00"));
    Ok(())
}

#[tokio::test]
async fn test_keep_past_when_filter_disabled() -> Result<()> {
    let temp_dir = tempdir()?;
    let input_path = temp_dir.path().join("records.ndjson");
    std::fs::write(
        &input_path,
        concat!(
            r#"{"id":"old","event_names":["Old"],"dates":["2020-01-01"],"url":"https://a.example/1"}"#,
            "\n",
            r#"{"id":"new","event_names":["New"],"dates":["2030-01-01"],"url":"https://a.example/2"}"#,
            "\n"
        ),
    )?;

    let mut config = Config::default();
    config.timezone.filter_past = false;

    let source = Arc::new(JsonRecordSource::new(input_path));
    let sink = Arc::new(GroupedOutputAdapter::new(
        temp_dir.path().join("out"),
        OutputFormat::Ndjson,
    ));
    let result = GroupingUseCase::new(source, sink, config)
        .run(Utc::now())
        .await?;

    assert_eq!(result.clusters, 2);
    assert_eq!(result.past_clusters_dropped, 0);
    let contents = std::fs::read_to_string(&result.output)?;
    assert_eq!(contents.lines().count(), 2);
    Ok(())
}

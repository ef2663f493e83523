use adrapp::api::init_project;
use adrapp::commands::{NewRecord, RecordUpdate};
use adrapp::filter::RecordFilter;
use adrapp::header;
use adrapp::init::initialize;
use adrapp::model::{Record, Status};
use adrapp::templates::render_update;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

#[test]
fn create_then_deprecate() {
    let temp = TempDir::new().unwrap();
    init_project(temp.path(), Path::new("doc/adr")).unwrap();

    let ctx = initialize(temp.path(), None).unwrap();
    let created = ctx
        .api
        .create_record(
            "My Decision",
            NewRecord {
                author: Some("Jane Doe".into()),
                tags: vec!["arch".into()],
                ..Default::default()
            },
        )
        .unwrap();
    let record = created.affected_records[0].clone();
    let path = temp.path().join("doc/adr/001_my_decision.md");
    assert_eq!(created.paths, vec![path.clone()]);
    let original = fs::read_to_string(&path).unwrap();

    let ctx = initialize(temp.path(), None).unwrap();
    let listed = ctx.api.list_records(&RecordFilter::default()).unwrap();
    assert_eq!(listed.listed_records, vec![record.clone()]);

    let update = RecordUpdate {
        status: Some(Status::Deprecated),
        ..Default::default()
    };
    ctx.api.update_record(&record.id, &update).unwrap();

    let ctx = initialize(temp.path(), None).unwrap();
    let after = ctx.api.store().require(&record.id).unwrap().clone();
    assert_eq!(after.status, Status::Deprecated);
    assert!(after.last_update_date >= record.last_update_date);
    assert_eq!(
        Record {
            status: record.status,
            last_update_date: record.last_update_date,
            ..after.clone()
        },
        record
    );

    let rewritten = fs::read_to_string(&path).unwrap();
    let body_of = |text: &str| header::split(text).unwrap().1.to_string();
    assert_eq!(body_of(&rewritten), body_of(&original));
    assert!(rewritten.contains("\n# My Decision\n"));
}

#[test]
fn encoded_records_parse_back() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("003_legacy.md"),
        "---\nID: 42\nauthor: ~\ntags: [b, a, b]\nsuperseders: x\n---\nfree text\n",
    )
    .unwrap();

    let ctx = initialize(temp.path(), Some(temp.path().to_path_buf())).unwrap();
    let record = ctx.api.store().require("42").unwrap().clone();
    assert_eq!(record.status, Status::Unknown);
    assert_eq!(record.creation_date, header::zero_date() + chrono::Duration::days(3));

    let text = render_update(&header::encode(&record), &record.body).unwrap();
    assert_eq!(header::parse_record(&record.name, &text).unwrap(), record);
}

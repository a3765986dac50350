use group_folds::partition::GroupKeyOf;
use group_folds::record::{MetaColumn, Metadata, MetadataValue, Record, DEFAULT_GROUP_COLUMN};
use group_folds::types::{FoldError, GroupKey};

#[test]
fn default_column_is_file() {
    assert_eq!(MetaColumn::default().name(), DEFAULT_GROUP_COLUMN);
    assert_eq!(DEFAULT_GROUP_COLUMN, "FILE");
}

#[test]
fn meta_column_reads_string_and_number_values() {
    let record = Record::new("r0")
        .with_string("FILE", "talk.txt")
        .with_number("turn", 12);

    assert_eq!(
        MetaColumn::default().group_key(0, &record).unwrap(),
        GroupKey::new("talk.txt")
    );
    assert_eq!(
        MetaColumn::new("turn").group_key(0, &record).unwrap(),
        GroupKey::new("12")
    );
    assert_eq!(
        MetaColumn::new("speaker").group_key(4, &record),
        Err(FoldError::MissingColumn {
            record_index: 4,
            column: "speaker".to_string(),
        })
    );
}

#[test]
fn later_insert_overrides_column() {
    let mut metadata = Metadata::new();
    assert_eq!(metadata.insert("FILE", "a.txt"), None);
    assert_eq!(
        metadata.insert("FILE", 3_i64),
        Some(MetadataValue::String("a.txt".to_string()))
    );

    assert_eq!(metadata.len(), 1);
    assert_eq!(metadata.get("FILE"), Some(&MetadataValue::Number(3)));
}

#[test]
fn string_and_number_with_same_text_share_a_group() {
    let as_text = Record::new("r0").with_string("dialogue", "17");
    let as_number = Record::new("r1").with_number("dialogue", 17);
    let column = MetaColumn::new("dialogue");

    assert_ne!(as_text.metadata, as_number.metadata);
    assert_eq!(
        column.group_key(0, &as_text).unwrap(),
        column.group_key(1, &as_number).unwrap()
    );
}

#[test]
fn closures_are_accessors() {
    let key_of = |r: &Record| r.id.len();
    assert_eq!(key_of.group_key(0, &Record::new("abc")).unwrap(), 3);
}

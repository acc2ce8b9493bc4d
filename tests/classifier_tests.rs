use report_card_server::form::classify::classify;
use report_card_server::template::profile::{KINDERGARTEN, PLAY_GROUP};
use report_card_server::template::{load_template, ClassCategory};

#[test]
fn test_personal_fields_never_land_in_subjects_or_traits() {
    let names = vec![
        "name".to_string(),
        "dob".to_string(),
        "attendance".to_string(),
        "scholar num".to_string(),
        "height/weight".to_string(),
    ];
    let partition = classify(&names, &KINDERGARTEN);

    assert_eq!(partition.personal, names);
    assert!(partition.subjects.is_empty());
    assert!(partition.traits.is_empty());
}

#[test]
fn test_kindergarten_template_classifies_fully() {
    let template = load_template(ClassCategory::Kindergarten).unwrap();
    let partition = classify(&template.field_names(), &KINDERGARTEN);

    assert_eq!(partition.personal.len(), 8);
    assert_eq!(partition.subjects.len(), 8);
    assert_eq!(partition.traits.len(), 4);
    assert!(partition.subjects.contains("englishrhymes"));
    assert!(partition.traits.contains("participation"));
}

#[test]
fn test_play_group_template_classifies_fully() {
    let template = load_template(ClassCategory::PlayGroup).unwrap();
    let partition = classify(&template.field_names(), &PLAY_GROUP);

    // Scalar subjects with separators classify by whole name; the dash-free
    // ones fall into the personal bucket together with the student details.
    assert!(partition.subjects.contains("english-A-to-Z"));
    assert!(partition.subjects.contains("days-and-colours"));
    assert!(partition.traits.is_empty());
    assert!(partition.personal.contains(&"name".to_string()));
}

#[test]
fn test_duplicate_roots_collapse_into_one_entry() {
    let names = vec![
        "english-oral-term1".to_string(),
        "english-written-term1".to_string(),
        "english-total-term1".to_string(),
        "english-oral-term2".to_string(),
        "english-total".to_string(),
    ];
    let partition = classify(&names, &KINDERGARTEN);
    assert_eq!(partition.subjects.len(), 1);
}

#[test]
fn test_unknown_roots_are_dropped_not_misfiled() {
    let names = vec![
        "physics-oral-term1".to_string(),
        "tidiness-term1".to_string(),
    ];
    let partition = classify(&names, &KINDERGARTEN);
    assert!(partition.personal.is_empty());
    assert!(partition.subjects.is_empty());
    assert!(partition.traits.is_empty());
}

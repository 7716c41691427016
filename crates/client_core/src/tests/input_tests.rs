use super::*;

fn kenya_corn() -> PredictionInput {
    PredictionInput::default()
        .update(Field::Country, "Kenya")
        .update(Field::Province, "Nakuru")
        .update(Field::Product, "Corn")
        .update(Field::SeasonName, "Spring")
        .update(Field::TimeToHarvest, "90")
        .update(Field::Area, "10")
        .update(Field::Production, "25")
}

#[test]
fn update_replaces_only_the_named_field() {
    let before = kenya_corn();
    let after = before.update(Field::Province, "Kisumu");

    assert_eq!(after.province, "Kisumu");
    assert_eq!(after.country, before.country);
    assert_eq!(after.product, before.product);
    assert_eq!(after.area, before.area);
    assert_eq!(before.province, "Nakuru");
}

#[test]
fn numeric_entry_coerces_garbage_to_zero() {
    let input = PredictionInput::default()
        .update(Field::Area, "12.5ha")
        .update(Field::Production, "")
        .update(Field::TimeToHarvest, " 45 ");

    assert_eq!(input.area, 0.0);
    assert_eq!(input.production, 0.0);
    assert_eq!(input.time_to_harvest, 45.0);
    assert_eq!(coerce_number("NaN"), 0.0);
    assert_eq!(coerce_number("inf"), 0.0);
    assert_eq!(coerce_number("-3"), -3.0);
}

#[test]
fn unknown_choice_leaves_field_unset() {
    let input = kenya_corn().update(Field::Product, "Barley");
    assert_eq!(input.product, None);

    let input = kenya_corn().update(Field::SeasonName, "");
    assert_eq!(input.season_name, None);
}

#[test]
fn partial_records_are_representable() {
    let mut model = InputModel::new();
    model.edit(Field::Country, "Kenya");

    assert_eq!(model.snapshot().country, "Kenya");
    assert_eq!(model.snapshot().product, None);
}

#[test]
fn valid_record_yields_equal_payload() {
    let input = kenya_corn();
    let record = validate(&input).expect("valid");
    let payload = record.payload();

    assert_eq!(payload.country, "Kenya");
    assert_eq!(payload.province, "Nakuru");
    assert_eq!(payload.product, Product::Corn);
    assert_eq!(payload.season_name, Season::Spring);
    assert_eq!(payload.time_to_harvest, 90.0);
    assert_eq!(payload.area, 10.0);
    assert_eq!(payload.production, 25.0);
}

#[test]
fn each_empty_required_field_is_named() {
    let cases = [
        (Field::Country, "Country is required"),
        (Field::Province, "Province is required"),
        (Field::Product, "Product is required"),
        (Field::SeasonName, "Season is required"),
    ];

    for (field, expected) in cases {
        let input = kenya_corn().update(field, "");
        let err = validate(&input).expect_err("must fail");
        assert_eq!(err.field, field);
        assert_eq!(err.message, expected);
    }
}

#[test]
fn each_negative_number_is_rejected() {
    let cases = [
        (Field::TimeToHarvest, "Time to harvest must be positive"),
        (Field::Area, "Area must be positive"),
        (Field::Production, "Production must be positive"),
    ];

    for (field, expected) in cases {
        let input = kenya_corn().update(field, "-1");
        let err = validate(&input).expect_err("must fail");
        assert_eq!(err.field, field);
        assert_eq!(err.to_string(), expected);
    }
}

#[test]
fn zero_is_an_accepted_number() {
    let input = kenya_corn()
        .with_number(Field::Area, 0.0)
        .with_number(Field::Production, -0.0);
    assert!(validate(&input).is_ok());
}

#[test]
fn nan_fails_the_non_negative_rule() {
    let input = kenya_corn().with_number(Field::Area, f64::NAN);
    let err = validate(&input).expect_err("nan must fail");
    assert_eq!(err.field, Field::Area);
}

#[test]
fn reports_only_first_failure_in_declaration_order() {
    let input = PredictionInput {
        province: String::new(),
        area: -5.0,
        ..kenya_corn()
    }
    .update(Field::SeasonName, "");

    let err = validate(&input).expect_err("must fail");
    assert_eq!(err.field, Field::Province);

    let err = validate(&PredictionInput::default()).expect_err("empty form");
    assert_eq!(err.field, Field::Country);
}

#[test]
fn typed_setters_match_text_updates() {
    let typed = PredictionInput::default()
        .with_product(Product::Wheat)
        .with_season(Season::Fall);
    let text = PredictionInput::default()
        .update(Field::Product, "wheat")
        .update(Field::SeasonName, "fall");
    assert_eq!(typed, text);
}

#[test]
fn field_names_parse_in_either_case_style() {
    assert_eq!("seasonName".parse::<Field>().expect("camel"), Field::SeasonName);
    assert_eq!("time_to_harvest".parse::<Field>().expect("snake"), Field::TimeToHarvest);
    assert_eq!("time-to-harvest".parse::<Field>().expect("kebab"), Field::TimeToHarvest);
    assert!("yield".parse::<Field>().is_err());
}

#![forbid(unsafe_code)]

//! End-to-end form flows driven through the public facade.

use maskform::prelude::*;
use maskform::{EditDelta, ValidationPolicy};

fn registration_form() -> (Form, FieldId, FieldId) {
    let mut form = Form::new();
    let tax_id = form
        .declare(FieldSpec::builder(FieldKind::NationalIdShort))
        .unwrap();
    let email = form.declare(FieldSpec::builder(FieldKind::Email)).unwrap();
    (form, tax_id, email)
}

#[test]
fn tax_id_and_email_drive_submit() {
    let (mut form, tax_id, email) = registration_form();
    assert_eq!(form.submit_state(), SubmitState::Disabled);

    form.type_text(tax_id, "10020214995").unwrap();
    let state = form.state(tax_id).unwrap();
    assert_eq!(state.text(), "100.202.149-95");
    assert!(state.is_ok());
    assert!(!form.is_submit_enabled());

    form.type_text(email, "aaaaaaa").unwrap();
    let state = form.state(email).unwrap();
    assert!(!state.is_ok());
    assert_eq!(state.last_error(), Some(ErrorKind::TypeInvalid));
    assert!(!form.is_submit_enabled());

    form.type_text(email, "@gmail").unwrap();
    assert!(!form.is_submit_enabled(), "no dot yet");

    form.type_text(email, ".com").unwrap();
    assert_eq!(form.raw_value(email).unwrap(), "aaaaaaa@gmail.com");
    assert!(form.state(email).unwrap().is_ok());
    assert!(form.is_submit_enabled());
    assert!(form.errors().is_empty());
}

#[test]
fn second_at_sign_disables_again() {
    let (mut form, tax_id, email) = registration_form();
    form.set_value(tax_id, "10020214995").unwrap();
    form.set_value(email, "a@b.com").unwrap();
    assert!(form.is_submit_enabled());

    form.type_text(email, "@").unwrap();
    assert!(!form.is_submit_enabled());
    assert_eq!(form.errors(), vec![(email, ErrorKind::TypeInvalid)]);

    form.backspace(email).unwrap();
    assert!(form.is_submit_enabled());
}

#[test]
fn wrong_check_digit_is_type_invalid() {
    let (mut form, tax_id, _) = registration_form();
    form.type_text(tax_id, "12345678901").unwrap();
    let state = form.state(tax_id).unwrap();
    assert_eq!(state.text(), "123.456.789-01");
    assert_eq!(state.last_error(), Some(ErrorKind::TypeInvalid));
    assert_eq!(state.error_detail().unwrap().param("name"), Some("Tax ID"));
}

#[test]
fn company_id_typed_digit_by_digit() {
    let mut form = Form::new();
    let id = form
        .declare(FieldSpec::builder(FieldKind::NationalIdLong))
        .unwrap();
    form.type_text(id, "41705727000151").unwrap();
    assert_eq!(form.raw_value(id).unwrap(), "41.705.727/0001-51");
    assert!(form.state(id).unwrap().is_ok());
}

#[test]
fn cellphone_picks_layout_by_length() {
    let mut form = Form::new();
    let phone = form
        .declare(FieldSpec::builder(FieldKind::Cellphone))
        .unwrap();

    form.type_text(phone, "1187654321").unwrap();
    assert_eq!(form.raw_value(phone).unwrap(), "(11) 8765-4321");
    assert!(form.state(phone).unwrap().is_ok());

    form.type_text(phone, "9").unwrap();
    assert_eq!(form.raw_value(phone).unwrap(), "(11) 87654-3219");
    assert!(form.state(phone).unwrap().is_ok());
}

#[test]
fn cellphone_backspace_returns_to_short_layout() {
    let mut form = Form::new();
    let phone = form
        .declare(FieldSpec::builder(FieldKind::Cellphone))
        .unwrap();

    form.type_text(phone, "11987654321").unwrap();
    assert_eq!(form.raw_value(phone).unwrap(), "(11) 98765-4321");

    let out = form.backspace(phone).unwrap();
    assert_eq!(out.text, "(11) 9876-5432");
    assert_eq!(out.cursor, 14);
    assert!(form.state(phone).unwrap().is_ok());

    form.backspace(phone).unwrap();
    assert_eq!(form.raw_value(phone).unwrap(), "(11) 9876-543");
    assert_eq!(
        form.state(phone).unwrap().last_error(),
        Some(ErrorKind::MinLengthNotMet)
    );
}

#[test]
fn deleting_a_delimiter_keeps_the_tax_id() {
    let mut form = Form::new();
    let id = form
        .declare(FieldSpec::builder(FieldKind::NationalIdShort))
        .unwrap();
    form.set_value(id, "10020214995").unwrap();

    let out = form
        .on_field_changed(id, &EditDelta::delete("100.202.149-95", 3, 1))
        .unwrap();
    assert_eq!(out.text, "100.202.149-95");
    assert_eq!(out.cursor, 14);
    assert_eq!(form.unmasked_value(id).unwrap(), "10020214995");
    assert!(form.is_submit_enabled());
}

#[test]
fn date_and_postal_code() {
    let mut form = Form::new();
    let date = form.declare(FieldSpec::builder(FieldKind::Date)).unwrap();
    let cep = form
        .declare(FieldSpec::builder(FieldKind::PostalCode))
        .unwrap();

    form.type_text(date, "12032024").unwrap();
    form.type_text(cep, "01310100").unwrap();
    assert_eq!(form.raw_value(date).unwrap(), "12/03/2024");
    assert_eq!(form.raw_value(cep).unwrap(), "01310-100");
    assert_eq!(form.unmasked_value(date).unwrap(), "12032024");
    assert!(form.is_submit_enabled());
}

#[test]
fn backspace_never_strands_delimiters() {
    let mut form = Form::new();
    let id = form
        .declare(FieldSpec::builder(FieldKind::Phone))
        .unwrap();
    form.type_text(id, "1132654321").unwrap();
    assert_eq!(form.raw_value(id).unwrap(), "(11) 3265-4321");

    let mut guard = 0;
    while !form.raw_value(id).unwrap().is_empty() {
        form.backspace(id).unwrap();
        let text = form.raw_value(id).unwrap();
        assert!(
            text.is_empty() || text.chars().any(|c| c.is_ascii_digit()),
            "stranded delimiters: {text:?}"
        );
        guard += 1;
        assert!(guard <= 14, "backspace did not converge");
    }
}

#[test]
fn mid_buffer_deletion_reflows() {
    let mut form = Form::new();
    let id = form
        .declare(FieldSpec::builder(FieldKind::PostalCode))
        .unwrap();
    form.set_value(id, "01310100").unwrap();
    assert!(form.state(id).unwrap().is_ok());

    let out = form
        .on_field_changed(id, &EditDelta::delete("01310-100", 0, 1))
        .unwrap();
    assert_eq!(out.text, "13101-00");
    assert_eq!(out.cursor, 0);
    assert_eq!(
        form.state(id).unwrap().last_error(),
        Some(ErrorKind::ExactLengthMismatch)
    );
    assert!(!form.is_submit_enabled());
}

#[test]
fn optional_fields_start_valid() {
    let mut form = Form::new();
    for kind in [FieldKind::PlainText, FieldKind::Email, FieldKind::Phone] {
        form.declare(FieldSpec::builder(kind).optional()).unwrap();
    }
    assert!(form.field_ids().all(|id| form.state(id).unwrap().is_ok()));
    assert!(form.is_submit_enabled());
}

#[test]
fn strict_policy_from_env_lookup() {
    let policy = ValidationPolicy::from_env_with(|key| {
        (key == "MASKFORM_STRICT_OPTIONAL").then(|| "yes".to_string())
    });
    let mut form = Form::with_policy(policy);
    let email = form
        .declare(FieldSpec::builder(FieldKind::Email).optional())
        .unwrap();

    form.type_text(email, "x").unwrap();
    assert!(!form.is_submit_enabled());
    form.backspace(email).unwrap();
    assert!(form.is_submit_enabled());
}

#[test]
fn letters_only_field_filters_digits() {
    let mut form = Form::new();
    let name = form
        .declare(FieldSpec::builder(FieldKind::PlainTextLetters))
        .unwrap();
    form.type_text(name, "Jo4ão 2Silva").unwrap();
    assert_eq!(form.raw_value(name).unwrap(), "João Silva");
    assert!(form.state(name).unwrap().is_ok());
}

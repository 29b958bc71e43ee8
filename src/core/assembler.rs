use crate::domain::model::{PassengerClass, PassengerForm, PassengerRecord, Pclass, Sex, Who};
use crate::utils::error::{AppError, Result};
use crate::utils::validation::{validate_range, validate_required_field};
use std::str::FromStr;

pub const AGE_RANGE: (u8, u8) = (0, 100);
pub const SIBSP_RANGE: (u8, u8) = (0, 10);
pub const PARCH_RANGE: (u8, u8) = (0, 10);
pub const FARE_RANGE: (f64, f64) = (0.0, 600.0);

fn parse_field<T>(field: &str, raw: &Option<String>) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let value = validate_required_field(field, raw)?;
    value.parse::<T>().map_err(|e| AppError::InvalidField {
        field: field.to_string(),
        value: value.to_string(),
        reason: e.to_string(),
    })
}

fn parse_count(field: &str, raw: &Option<String>, (min, max): (u8, u8)) -> Result<u8> {
    // 先以寬型別解析，讓 "-1" 或 "300" 回報範圍錯誤而非格式錯誤
    let value: i64 = parse_field(field, raw)?;
    validate_range(field, value, i64::from(min), i64::from(max))?;
    Ok(value as u8)
}

/// Packages the ten raw control values into a [`PassengerRecord`].
///
/// Every field is required and re-checked against its domain, since a
/// submitted form can carry anything regardless of how the controls are
/// constrained on the page.
pub fn assemble(form: &PassengerForm) -> Result<PassengerRecord> {
    let pclass: Pclass = parse_field("pclass", &form.pclass)?;
    let sex: Sex = parse_field("sex", &form.sex)?;
    let age = parse_count("age", &form.age, AGE_RANGE)?;
    let sibsp = parse_count("sibsp", &form.sibsp, SIBSP_RANGE)?;
    let parch = parse_count("parch", &form.parch, PARCH_RANGE)?;

    let fare: f64 = parse_field("fare", &form.fare)?;
    validate_range("fare", fare, FARE_RANGE.0, FARE_RANGE.1)?;

    let class: PassengerClass = parse_field("class", &form.class)?;
    let who: Who = parse_field("who", &form.who)?;
    let adult_male: bool = parse_field("adult_male", &form.adult_male)?;
    let alone: bool = parse_field("alone", &form.alone)?;

    let record = PassengerRecord {
        pclass,
        sex,
        age,
        sibsp,
        parch,
        fare,
        class,
        who,
        adult_male,
        alone,
    };

    tracing::debug!("Assembled passenger record: {:?}", record);
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first_class_woman() -> PassengerForm {
        PassengerForm {
            pclass: Some("1".to_string()),
            sex: Some("female".to_string()),
            age: Some("30".to_string()),
            sibsp: Some("0".to_string()),
            parch: Some("0".to_string()),
            fare: Some("100.0".to_string()),
            class: Some("First".to_string()),
            who: Some("woman".to_string()),
            adult_male: Some("false".to_string()),
            alone: Some("true".to_string()),
        }
    }

    #[test]
    fn test_assemble_valid_form() {
        let record = assemble(&first_class_woman()).unwrap();

        assert_eq!(record.pclass, Pclass::First);
        assert_eq!(record.sex, Sex::Female);
        assert_eq!(record.age, 30);
        assert_eq!(record.fare, 100.0);
        assert_eq!(record.class, PassengerClass::First);
        assert_eq!(record.who, Who::Woman);
        assert!(!record.adult_male);
        assert!(record.alone);
    }

    #[test]
    fn test_assembled_record_has_exactly_ten_fields() {
        let record = assemble(&PassengerForm::defaults()).unwrap();
        let names: Vec<&str> = record.columns().iter().map(|(name, _)| *name).collect();

        assert_eq!(names, PassengerRecord::FIELDS.to_vec());
    }

    #[test]
    fn test_assemble_accepts_domain_bounds() {
        let mut form = first_class_woman();
        form.age = Some("100".to_string());
        form.sibsp = Some("10".to_string());
        form.parch = Some("0".to_string());
        form.fare = Some("600".to_string());

        let record = assemble(&form).unwrap();
        assert_eq!(record.age, 100);
        assert_eq!(record.sibsp, 10);
        assert_eq!(record.fare, 600.0);
    }

    #[test]
    fn test_assemble_missing_field() {
        let mut form = first_class_woman();
        form.who = None;

        match assemble(&form) {
            Err(AppError::MissingField { field }) => assert_eq!(field, "who"),
            other => panic!("expected missing field error, got {:?}", other),
        }
    }

    #[test]
    fn test_assemble_blank_field_is_missing() {
        let mut form = first_class_woman();
        form.fare = Some("   ".to_string());

        assert!(matches!(
            assemble(&form),
            Err(AppError::MissingField { field }) if field == "fare"
        ));
    }

    #[test]
    fn test_assemble_out_of_domain_values() {
        let mut form = first_class_woman();
        form.age = Some("101".to_string());
        assert!(matches!(
            assemble(&form),
            Err(AppError::InvalidField { field, .. }) if field == "age"
        ));

        let mut form = first_class_woman();
        form.sibsp = Some("-1".to_string());
        assert!(matches!(
            assemble(&form),
            Err(AppError::InvalidField { field, .. }) if field == "sibsp"
        ));

        let mut form = first_class_woman();
        form.fare = Some("600.01".to_string());
        assert!(matches!(
            assemble(&form),
            Err(AppError::InvalidField { field, .. }) if field == "fare"
        ));

        let mut form = first_class_woman();
        form.fare = Some("NaN".to_string());
        assert!(matches!(
            assemble(&form),
            Err(AppError::InvalidField { field, .. }) if field == "fare"
        ));
    }

    #[test]
    fn test_assemble_unknown_enum_value() {
        let mut form = first_class_woman();
        form.pclass = Some("4".to_string());

        match assemble(&form) {
            Err(AppError::InvalidField { field, value, reason }) => {
                assert_eq!(field, "pclass");
                assert_eq!(value, "4");
                assert!(reason.contains("1, 2, 3"));
            }
            other => panic!("expected invalid field error, got {:?}", other),
        }

        let mut form = first_class_woman();
        form.alone = Some("yes".to_string());
        assert!(matches!(
            assemble(&form),
            Err(AppError::InvalidField { field, .. }) if field == "alone"
        ));
    }
}

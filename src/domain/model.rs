use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

macro_rules! text_enum {
    ($name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $text)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                match s {
                    $($text => Ok($name::$variant),)+
                    other => Err(format!(
                        "expected one of [{}], got '{}'",
                        [$($text),+].join(", "),
                        other
                    )),
                }
            }
        }
    };
}

text_enum!(Pclass { First => "1", Second => "2", Third => "3" });
text_enum!(Sex { Male => "male", Female => "female" });
text_enum!(PassengerClass { First => "First", Second => "Second", Third => "Third" });
text_enum!(Who { Man => "man", Woman => "woman", Child => "child" });

impl Pclass {
    pub fn number(&self) -> u8 {
        match self {
            Pclass::First => 1,
            Pclass::Second => 2,
            Pclass::Third => 3,
        }
    }
}

/// 單一欄位的值，供分類器編碼與原始輸入表格使用
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FeatureValue {
    Number(f64),
    Category(&'static str),
    Flag(bool),
}

impl FeatureValue {
    /// 數值型欄位的編碼；布林值視為 0/1
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FeatureValue::Number(v) => Some(*v),
            FeatureValue::Flag(b) => Some(if *b { 1.0 } else { 0.0 }),
            FeatureValue::Category(_) => None,
        }
    }

    /// 類別型欄位的編碼；數值與布林值以其文字形式比對
    pub fn as_category(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for FeatureValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureValue::Number(v) => write!(f, "{}", v),
            FeatureValue::Category(s) => f.write_str(s),
            FeatureValue::Flag(b) => write!(f, "{}", b),
        }
    }
}

/// One hypothetical passenger, fully validated against the feature domain.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PassengerRecord {
    pub pclass: Pclass,
    pub sex: Sex,
    pub age: u8,
    pub sibsp: u8,
    pub parch: u8,
    pub fare: f64,
    pub class: PassengerClass,
    pub who: Who,
    pub adult_male: bool,
    pub alone: bool,
}

impl PassengerRecord {
    pub const FIELDS: [&'static str; 10] = [
        "pclass",
        "sex",
        "age",
        "sibsp",
        "parch",
        "fare",
        "class",
        "who",
        "adult_male",
        "alone",
    ];

    /// The ten `(name, value)` pairs in schema order.
    pub fn columns(&self) -> Vec<(&'static str, FeatureValue)> {
        vec![
            ("pclass", FeatureValue::Number(f64::from(self.pclass.number()))),
            ("sex", FeatureValue::Category(self.sex.as_str())),
            ("age", FeatureValue::Number(f64::from(self.age))),
            ("sibsp", FeatureValue::Number(f64::from(self.sibsp))),
            ("parch", FeatureValue::Number(f64::from(self.parch))),
            ("fare", FeatureValue::Number(self.fare)),
            ("class", FeatureValue::Category(self.class.as_str())),
            ("who", FeatureValue::Category(self.who.as_str())),
            ("adult_male", FeatureValue::Flag(self.adult_male)),
            ("alone", FeatureValue::Flag(self.alone)),
        ]
    }

    pub fn feature(&self, name: &str) -> Option<FeatureValue> {
        self.columns()
            .into_iter()
            .find(|(field, _)| *field == name)
            .map(|(_, value)| value)
    }
}

/// Raw values captured from the ten page controls, before assembly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PassengerForm {
    pub pclass: Option<String>,
    pub sex: Option<String>,
    pub age: Option<String>,
    pub sibsp: Option<String>,
    pub parch: Option<String>,
    pub fare: Option<String>,
    pub class: Option<String>,
    pub who: Option<String>,
    pub adult_male: Option<String>,
    pub alone: Option<String>,
}

impl PassengerForm {
    /// 頁面初次載入時各控制項的預設值
    pub fn defaults() -> Self {
        Self {
            pclass: Some("1".to_string()),
            sex: Some("male".to_string()),
            age: Some("30".to_string()),
            sibsp: Some("0".to_string()),
            parch: Some("0".to_string()),
            fare: Some("50.0".to_string()),
            class: Some("First".to_string()),
            who: Some("man".to_string()),
            adult_male: Some("true".to_string()),
            alone: Some("true".to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SurvivalLabel {
    DidNotSurvive,
    Survived,
}

impl SurvivalLabel {
    pub fn from_class(label: u8) -> Option<Self> {
        match label {
            0 => Some(SurvivalLabel::DidNotSurvive),
            1 => Some(SurvivalLabel::Survived),
            _ => None,
        }
    }

    pub fn as_class(&self) -> u8 {
        match self {
            SurvivalLabel::DidNotSurvive => 0,
            SurvivalLabel::Survived => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PredictionResult {
    pub label: SurvivalLabel,
    /// Probability of the positive (survived) class, in `[0, 1]`.
    pub probability: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BarColor {
    Positive,
    Negative,
}

impl BarColor {
    pub fn hex(&self) -> &'static str {
        match self {
            BarColor::Positive => "#2ecc71",
            BarColor::Negative => "#e74c3c",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProbabilityBar {
    /// Bar height on a 0-100 axis.
    pub height: f64,
    pub color: BarColor,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Verdict {
    pub survived: bool,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Presentation {
    Prediction {
        result: PredictionResult,
        bar: ProbabilityBar,
        verdict: Verdict,
    },
    Error {
        message: String,
    },
}

use crate::core::assembler::{AGE_RANGE, FARE_RANGE, PARCH_RANGE, SIBSP_RANGE};
use crate::core::pipeline::{InputRow, Submission};
use crate::domain::model::{PassengerClass, PassengerForm, Pclass, Presentation, Sex, Verdict, Who};
use crate::utils::error::Result;
use minijinja::{context, Environment};
use serde::Serialize;

const TEMPLATE_NAME: &str = "index.html";
const CHART_HEIGHT: u32 = 300;

#[derive(Debug, Clone, Serialize)]
pub struct Control {
    pub name: &'static str,
    pub label: &'static str,
    /// `select`, `range` or `number`
    pub kind: &'static str,
    pub options: Vec<String>,
    pub min: String,
    pub max: String,
    pub step: String,
    pub value: String,
}

impl Control {
    fn select(name: &'static str, label: &'static str, options: Vec<String>, value: &Option<String>) -> Self {
        Self {
            name,
            label,
            kind: "select",
            options,
            min: String::new(),
            max: String::new(),
            step: String::new(),
            value: value.clone().unwrap_or_default(),
        }
    }

    fn numeric(
        name: &'static str,
        label: &'static str,
        kind: &'static str,
        (min, max, step): (String, String, String),
        value: &Option<String>,
    ) -> Self {
        Self {
            name,
            label,
            kind,
            options: Vec::new(),
            min,
            max,
            step,
            value: value.clone().unwrap_or_default(),
        }
    }
}

fn options<T: ToString>(values: &[T]) -> Vec<String> {
    values.iter().map(ToString::to_string).collect()
}

fn bounds<T: ToString>((min, max): (T, T), step: &str) -> (String, String, String) {
    (min.to_string(), max.to_string(), step.to_string())
}

/// The ten controls in schema order, showing the values in `form`.
pub fn controls(form: &PassengerForm) -> Vec<Control> {
    let flags = options(&[true, false]);
    vec![
        Control::select("pclass", "Passenger class (pclass)", options(Pclass::ALL), &form.pclass),
        Control::select("sex", "Sex", options(Sex::ALL), &form.sex),
        Control::numeric("age", "Age", "range", bounds(AGE_RANGE, "1"), &form.age),
        Control::numeric(
            "sibsp",
            "Siblings & spouses (sibsp)",
            "number",
            bounds(SIBSP_RANGE, "1"),
            &form.sibsp,
        ),
        Control::numeric(
            "parch",
            "Parents & children (parch)",
            "number",
            bounds(PARCH_RANGE, "1"),
            &form.parch,
        ),
        Control::numeric(
            "fare",
            "Fare paid (fare)",
            "number",
            (format!("{:.1}", FARE_RANGE.0), format!("{:.1}", FARE_RANGE.1), "0.01".to_string()),
            &form.fare,
        ),
        Control::select("class", "Class (class)", options(PassengerClass::ALL), &form.class),
        Control::select("who", "Person type (who)", options(Who::ALL), &form.who),
        Control::select("adult_male", "Adult male?", flags.clone(), &form.adult_male),
        Control::select("alone", "Travelling alone?", flags, &form.alone),
    ]
}

#[derive(Debug, Clone, Serialize)]
struct BarView {
    height: f64,
    pixels: f64,
    color: &'static str,
}

/// Everything the page template needs for one render.
#[derive(Debug, Clone, Serialize)]
pub struct PageView {
    controls: Vec<Control>,
    bar: Option<BarView>,
    verdict: Option<Verdict>,
    error: Option<String>,
    inputs: Vec<InputRow>,
}

impl PageView {
    pub fn initial() -> Self {
        Self {
            controls: controls(&PassengerForm::defaults()),
            bar: None,
            verdict: None,
            error: None,
            inputs: Vec::new(),
        }
    }

    pub fn from_submission(submission: &Submission) -> Self {
        let mut view = Self {
            controls: controls(&submission.form),
            bar: None,
            verdict: None,
            error: None,
            inputs: submission.input_table(),
        };

        match &submission.presentation {
            Presentation::Prediction { bar, verdict, .. } => {
                view.bar = Some(BarView {
                    height: bar.height,
                    pixels: bar.height * f64::from(CHART_HEIGHT) / 100.0,
                    color: bar.color.hex(),
                });
                view.verdict = Some(verdict.clone());
            }
            Presentation::Error { message } => view.error = Some(message.clone()),
        }

        view
    }
}

pub struct PageRenderer {
    env: Environment<'static>,
}

impl PageRenderer {
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();
        env.add_template(TEMPLATE_NAME, include_str!("../../templates/index.html"))?;
        Ok(Self { env })
    }

    pub fn render(&self, view: &PageView) -> Result<String> {
        let template = self.env.get_template(TEMPLATE_NAME)?;
        let html = template.render(context! {
            chart_height => CHART_HEIGHT,
            controls => &view.controls,
            bar => &view.bar,
            verdict => &view.verdict,
            error => &view.error,
            inputs => &view.inputs,
        })?;
        Ok(html)
    }
}

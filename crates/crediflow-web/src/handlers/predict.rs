//! Loan prediction form — applicant attributes in, classifier verdict out.

use axum::{extract::State, response::Html, Form};
use crediflow_common::{
    Education, Family, LoanApplication, AGE_RANGE, EXPERIENCE_RANGE,
};
use crediflow_model::{Label, LoanClassifier, Prediction};
use serde::Deserialize;

use crate::handlers::{escape_html, NAV_HTML};
use crate::state::SharedState;

/// Raw POST body of the prediction form. Checkboxes are present ("on")
/// when ticked and absent otherwise; ZIP stays free text so a bad entry
/// can be reported inline instead of failing extraction.
#[derive(Debug, Deserialize)]
pub struct PredictForm {
    pub id: u64,
    pub age: u32,
    pub experience: u32,
    pub income: u64,
    pub zip_code: String,
    pub family: u8,
    pub cc_avg: f64,
    pub education: u8,
    pub mortgage: u64,
    #[serde(default)]
    pub securities_account: Option<String>,
    #[serde(default)]
    pub cd_account: Option<String>,
    #[serde(default)]
    pub online: Option<String>,
    #[serde(default)]
    pub credit_card: Option<String>,
}

/// Form state echoed back into the re-rendered page.
#[derive(Debug, Clone)]
pub struct FormValues {
    pub id: u64,
    pub age: u32,
    pub experience: u32,
    pub income: u64,
    pub zip_code: String,
    pub family: u8,
    pub cc_avg: f64,
    pub education: u8,
    pub mortgage: u64,
    pub securities_account: bool,
    pub cd_account: bool,
    pub online: bool,
    pub credit_card: bool,
}

impl Default for FormValues {
    fn default() -> Self {
        Self {
            id: 0,
            age: 30,
            experience: 5,
            income: 0,
            zip_code: String::new(),
            family: 1,
            cc_avg: 0.0,
            education: 1,
            mortgage: 0,
            securities_account: false,
            cd_account: false,
            online: false,
            credit_card: false,
        }
    }
}

impl FormValues {
    /// Mirror the widget-level clamping server-side, once, so the echoed
    /// form and the record handed to the classifier show the same values.
    fn clamp_to_widget_ranges(mut self) -> Self {
        self.age = self.age.clamp(AGE_RANGE.0, AGE_RANGE.1);
        self.experience = self
            .experience
            .clamp(EXPERIENCE_RANGE.0, EXPERIENCE_RANGE.1);
        self.cc_avg = self.cc_avg.max(0.0);
        self
    }
}

impl From<PredictForm> for FormValues {
    fn from(form: PredictForm) -> Self {
        Self {
            id: form.id,
            age: form.age,
            experience: form.experience,
            income: form.income,
            zip_code: form.zip_code,
            family: form.family,
            cc_avg: form.cc_avg,
            education: form.education,
            mortgage: form.mortgage,
            securities_account: form.securities_account.is_some(),
            cd_account: form.cd_account.is_some(),
            online: form.online.is_some(),
            credit_card: form.credit_card.is_some(),
        }
        .clamp_to_widget_ranges()
    }
}

/// What the submit produced: a prediction, an inline ZIP error, or a
/// rejected select value.
#[derive(Debug, Clone, PartialEq)]
pub enum PredictOutcome {
    Predicted(Prediction),
    ZipInvalid,
    Invalid(String),
}

pub async fn predict_page(State(_state): State<SharedState>) -> Html<String> {
    Html(render_predict_page(&FormValues::default(), None))
}

pub async fn predict_submit(
    State(state): State<SharedState>,
    Form(form): Form<PredictForm>,
) -> Html<String> {
    let values = FormValues::from(form);
    let outcome = evaluate(&state.classifier, &values);
    Html(render_predict_page(&values, Some(&outcome)))
}

/// Run the full submit path: parse ZIP, assemble the record, classify.
/// An unparseable ZIP stops here — no record is built and the model is
/// never invoked.
pub(crate) fn evaluate(classifier: &LoanClassifier, values: &FormValues) -> PredictOutcome {
    let zip_code = match parse_zip(&values.zip_code) {
        Some(zip) => zip,
        None => return PredictOutcome::ZipInvalid,
    };

    match build_record(values, zip_code) {
        Ok(record) => PredictOutcome::Predicted(classifier.predict(&record)),
        Err(message) => PredictOutcome::Invalid(message),
    }
}

/// ZIP codes arrive as free text; only a plain non-negative integer is
/// accepted.
pub(crate) fn parse_zip(input: &str) -> Option<u32> {
    input.trim().parse::<u32>().ok()
}

/// Assemble the fixed-schema record from validated, already-clamped form
/// state.
pub(crate) fn build_record(
    values: &FormValues,
    zip_code: u32,
) -> Result<LoanApplication, String> {
    let family = Family::from_value(values.family)
        .ok_or_else(|| format!("family size must be 1-4, got {}", values.family))?;
    let education = Education::from_value(values.education)
        .ok_or_else(|| format!("education level must be 1-3, got {}", values.education))?;

    Ok(LoanApplication {
        id: values.id,
        age: values.age,
        experience: values.experience,
        income: values.income,
        zip_code,
        family,
        cc_avg: values.cc_avg,
        education,
        mortgage: values.mortgage,
        securities_account: values.securities_account,
        cd_account: values.cd_account,
        online: values.online,
        credit_card: values.credit_card,
    })
}

fn render_predict_page(values: &FormValues, outcome: Option<&PredictOutcome>) -> String {
    let zip_error_html = match outcome {
        Some(PredictOutcome::ZipInvalid) => {
            r#"<div class="field-error">Enter a valid ZIP code (digits only).</div>"#
        }
        _ => "",
    };

    let result_html = match outcome {
        Some(PredictOutcome::Predicted(p)) => match p.label {
            Label::Accept => format!(
                r#"<div class="alert alert-success mt-4">✅ This applicant is <strong>likely to accept</strong> the loan offer. (p = {:.3})</div>"#,
                p.probability
            ),
            Label::Decline => format!(
                r#"<div class="alert alert-warning mt-4">❌ This applicant is <strong>unlikely to accept</strong> the loan offer. (p = {:.3})</div>"#,
                p.probability
            ),
        },
        Some(PredictOutcome::Invalid(message)) => format!(
            r#"<div class="alert alert-danger mt-4">Invalid input: {}</div>"#,
            escape_html(message)
        ),
        _ => String::new(),
    };

    let family_options: String = (1u8..=4)
        .map(|v| {
            let selected = if v == values.family { " selected" } else { "" };
            format!(r#"<option value="{v}"{selected}>{v}</option>"#)
        })
        .collect();

    let education_options: String = [
        Education::Undergraduate,
        Education::Graduate,
        Education::Advanced,
    ]
    .iter()
    .map(|e| {
        let v = e.as_u8();
        let selected = if v == values.education { " selected" } else { "" };
        format!(r#"<option value="{v}"{selected}>{} — {}</option>"#, v, e.label())
    })
    .collect();

    let checked = |on: bool| if on { " checked" } else { "" };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>Loan Prediction — Crediflow</title>
    <link rel="stylesheet" href="/static/css/main.css">
</head>
<body>
<div class="app-container">
{nav}
<main class="main-content">
    <div class="page-header">
        <div>
            <h1 class="page-title">🏦 Bank Loan Prediction</h1>
            <p class="text-muted">Fill in the applicant's details and run the classifier</p>
        </div>
    </div>

    <div class="card">
        <form method="POST" action="/predict">
            <div class="form-grid">
                <div class="form-group">
                    <label for="id">Customer ID</label>
                    <input type="number" id="id" name="id" class="form-control" min="0" value="{id}" required>
                </div>
                <div class="form-group">
                    <label for="age">Age: <span class="range-value">{age}</span></label>
                    <input type="range" id="age" name="age" class="form-range" min="18" max="75" value="{age}"
                        oninput="this.previousElementSibling.querySelector('.range-value').textContent=this.value">
                </div>
                <div class="form-group">
                    <label for="experience">Experience (years): <span class="range-value">{experience}</span></label>
                    <input type="range" id="experience" name="experience" class="form-range" min="0" max="50" value="{experience}"
                        oninput="this.previousElementSibling.querySelector('.range-value').textContent=this.value">
                </div>
                <div class="form-group">
                    <label for="income">Annual income (thousands $)</label>
                    <input type="number" id="income" name="income" class="form-control" min="0" value="{income}" required>
                </div>
                <div class="form-group">
                    <label for="zip_code">ZIP code</label>
                    <input type="text" id="zip_code" name="zip_code" class="form-control" maxlength="10" value="{zip}">
                    {zip_error}
                </div>
                <div class="form-group">
                    <label for="family">Family size</label>
                    <select id="family" name="family" class="form-control">{family_options}</select>
                </div>
                <div class="form-group">
                    <label for="cc_avg">Avg. credit card spend (thousands $)</label>
                    <input type="number" id="cc_avg" name="cc_avg" class="form-control" min="0" step="0.01" value="{cc_avg}" required>
                </div>
                <div class="form-group">
                    <label for="education">Education level</label>
                    <select id="education" name="education" class="form-control">{education_options}</select>
                </div>
                <div class="form-group">
                    <label for="mortgage">Mortgage amount (thousands $)</label>
                    <input type="number" id="mortgage" name="mortgage" class="form-control" min="0" value="{mortgage}" required>
                </div>
            </div>

            <div class="checkbox-row">
                <label><input type="checkbox" name="securities_account"{sec}> Securities account</label>
                <label><input type="checkbox" name="cd_account"{cd}> CD account</label>
                <label><input type="checkbox" name="online"{online}> Online banking</label>
                <label><input type="checkbox" name="credit_card"{cc}> Credit card</label>
            </div>

            <button type="submit" class="btn btn-primary mt-4">🔍 Predict</button>
        </form>
        {result}
    </div>
</main>
</div>
</body>
</html>"#,
        nav = NAV_HTML,
        id = values.id,
        age = values.age,
        experience = values.experience,
        income = values.income,
        zip = escape_html(&values.zip_code),
        zip_error = zip_error_html,
        family_options = family_options,
        cc_avg = values.cc_avg,
        education_options = education_options,
        mortgage = values.mortgage,
        sec = checked(values.securities_account),
        cd = checked(values.cd_account),
        online = checked(values.online),
        cc = checked(values.credit_card),
        result = result_html,
    )
}

use crate::claim::FnolReport;

const RESPONSE_FORMAT: &str = r#"Your job:
1. Normalize the date into dd.mm.yyyy format.
2. Extract full address if possible (street, number, city, postal code, country).
3. Analyze damage severity and possible injuries.
4. Produce a "risk_category" and liability estimate if applicable.
5. Give clear recommendations to the user about next steps.

Return **only valid JSON** with the following fields:

{
    "date_normalized": "",
    "location_normalized": {
        "street": "",
        "street_number": "",
        "city": "",
        "postal_code": "",
        "country": ""
    },
    "risk_category": "",
    "estimated_damage_severity": "",
    "injury_assessment": "",
    "liability_estimate": "",
    "recommendations": ""
}
"#;

/// Builds the instruction sent to the completion backend for a single report
pub fn build_fnol_prompt(report: &FnolReport) -> String {
    let images = report
        .images
        .iter()
        .map(|image| image.reference())
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        r#"
You are an insurance AI assistant. 

You receive the following FNOL (First Notice of Loss) report:

Date: {date}
Location: {location}
Description: {description}
{metadata}Images: {images}

{RESPONSE_FORMAT}"#,
        date = report.date,
        location = report.location,
        description = report.description,
        metadata = metadata_lines(report),
    )
}

fn metadata_lines(report: &FnolReport) -> String {
    let mut lines = String::new();
    if let Some(incident_type) = &report.incident_type {
        lines.push_str(&format!("Incident type: {incident_type}\n"));
    }
    if let Some(severity) = &report.severity {
        lines.push_str(&format!("Severity: {severity}\n"));
    }
    if let Some(third_party) = report.third_party_involved {
        lines.push_str(&format!("Third party involved: {}\n", yes_no(third_party)));
    }
    if let Some(injuries) = report.injuries {
        lines.push_str(&format!("Injuries reported: {}\n", yes_no(injuries)));
    }
    lines
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

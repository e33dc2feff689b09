//! Browser-facing verification pages.
//!
//! Pure string builders; the route layer decides status codes and headers.
//! Colors and badge text derive from the record's computed validity, never
//! from a hardcoded "valid".

use crate::record::{PermitRecord, ValidityStatus};
use chrono::NaiveDate;

struct Palette {
    text: &'static str,
    background: &'static str,
    icon: &'static str,
    mark: &'static str,
}

fn palette(status: ValidityStatus) -> Palette {
    match status {
        ValidityStatus::Valid => Palette {
            text: "#007a3d",
            background: "#e8f5e9",
            icon: "#007a3d",
            mark: "\u{2713}",
        },
        ValidityStatus::Expired => Palette {
            text: "#cc0000",
            background: "#f1d4d4",
            icon: "#d32f2f",
            mark: "\u{2717}",
        },
    }
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn section(label: &str, value: &str) -> String {
    format!(
        r#"<div class="section"><div class="section-label">{}</div><div class="field-value">{}</div></div>"#,
        escape(label),
        escape(value)
    )
}

fn optional_section(label: &str, value: &Option<String>) -> String {
    match value.as_deref() {
        Some(v) if !v.is_empty() => section(label, v),
        _ => String::new(),
    }
}

/// Full verification page for a resolved record. `today` fixes the validity
/// computation and the printed verification date.
pub fn verification_page(record: &PermitRecord, base_url: &str, today: NaiveDate) -> String {
    let status = record.validity_status(today);
    let colors = palette(status);
    let full_name = record.full_name();
    let reference = record.primary_reference().unwrap_or("\u{2014}");
    let verification_url = crate::signing::document_verification_url(record.id, base_url);
    let verification_date = today.format("%-d %B %Y");

    let id_number = record
        .id_number
        .clone()
        .or_else(|| record.identity_number.clone());

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>Official DHA Document Verification - {full_name}</title>
<style>
* {{ margin: 0; padding: 0; box-sizing: border-box; }}
body {{ font-family: 'Helvetica Neue', Helvetica, Arial, sans-serif; background: #f5f5f5; min-height: 100vh; padding: 20px; }}
.container {{ max-width: 900px; margin: 30px auto; background: white; box-shadow: 0 4px 20px rgba(0,0,0,0.1); border: 1px solid #ddd; }}
.dha-header {{ padding: 25px 40px; border-bottom: 3px solid #007a3d; }}
.dha-title {{ color: #007a3d; font-size: 26px; font-weight: 700; text-transform: uppercase; letter-spacing: 0.5px; }}
.dha-subtitle {{ color: #333; font-size: 12px; text-transform: uppercase; letter-spacing: 0.8px; margin-top: 5px; }}
.rsa-text {{ text-align: right; color: #666; font-size: 10px; text-transform: uppercase; }}
.header {{ padding: 30px 40px 20px; text-align: center; }}
.verification-badge {{ background: {bg}; border: 3px solid {border}; color: {text}; padding: 15px 30px; border-radius: 8px; font-size: 24px; font-weight: 800; display: inline-block; text-transform: uppercase; letter-spacing: 1px; margin: 20px 0; }}
.status-icon {{ display: inline-block; width: 70px; height: 70px; background: {icon}; border-radius: 50%; margin: 20px auto; position: relative; }}
.status-icon::after {{ content: '{mark}'; position: absolute; top: 50%; left: 50%; transform: translate(-50%, -50%); color: white; font-size: 36px; font-weight: bold; }}
.content {{ padding: 40px; }}
.official-notice {{ background: #fff8e1; border-left: 5px solid #ffa000; padding: 20px 25px; margin: 25px 0; font-size: 14px; line-height: 1.7; border-radius: 4px; }}
.section {{ margin-bottom: 20px; padding: 18px; background: #f8f9fa; border-left: 4px solid #007a3d; border-radius: 4px; }}
.section-label {{ font-size: 11px; color: #007a3d; text-transform: uppercase; letter-spacing: 1px; font-weight: 700; margin-bottom: 10px; }}
.permit-type {{ display: inline-block; background: {bg}; border: 2px solid {border}; color: {text}; padding: 12px 24px; border-radius: 25px; font-size: 18px; font-weight: 700; }}
.permit-number {{ font-size: 28px; font-weight: 700; color: #007a3d; letter-spacing: 1px; }}
.field-value {{ font-size: 18px; font-weight: 600; color: #212529; }}
.qr-section {{ border: 3px solid #007a3d; border-radius: 8px; padding: 30px; text-align: center; margin: 30px 0; }}
.qr-section img {{ width: 220px; height: 220px; border: 2px solid #007a3d; border-radius: 4px; padding: 15px; background: white; }}
.qr-text {{ margin-top: 15px; font-size: 15px; color: #666; }}
.verification-links {{ background: #e8f4f8; border-left: 5px solid #0066cc; padding: 25px; border-radius: 8px; margin: 30px 0; }}
.verification-link {{ color: #0066cc; text-decoration: none; font-size: 16px; font-weight: 600; padding: 12px 20px; background: white; border-radius: 8px; border: 2px solid #0066cc; display: inline-block; }}
.info-grid {{ display: grid; grid-template-columns: repeat(auto-fit, minmax(250px, 1fr)); gap: 20px; margin: 20px 0; }}
</style>
</head>
<body>
<div class="container">
  <div class="dha-header">
    <div class="dha-title">Department of Home Affairs</div>
    <div class="dha-subtitle">Republic of South Africa</div>
    <div class="rsa-text">OFFICIAL DOCUMENT VERIFICATION</div>
  </div>
  <div class="header">
    <div class="status-icon"></div>
    <div class="verification-badge">DOCUMENT {status_text}</div>
    <h1 style="font-size: 32px; color: #333; margin: 20px 0; font-weight: 700;">{full_name}</h1>
    <div class="official-notice">
      <strong>OFFICIAL VERIFICATION NOTICE</strong><br>
      This is an official verification page from the Department of Home Affairs, Republic of South Africa.
      The document details below have been verified against the National Population Register (NPR) and official DHA databases.
      This verification is valid as of {verification_date}.
    </div>
  </div>
  <div class="content">
    <div class="section"><div class="section-label">PERMIT TYPE</div><div class="permit-type">{document_type}</div></div>
    <div class="section"><div class="section-label">PERMIT NUMBER</div><div class="permit-number">{reference}</div></div>
    <div class="info-grid">
      {passport_section}
      {id_section}
      {issue_section}
      {expiry_section}
    </div>
    {nationality_section}
    {category_section}
    {officer_sections}
    <div class="qr-section">
      <img src="/permits/{id}/qr" alt="QR Code">
      <div class="qr-text">Scan to verify on official DHA website</div>
    </div>
    <div class="verification-links">
      <h3>Official Verification Links</h3>
      <a href="{verification_url}" class="verification-link" target="_blank">Verify on DHA Official Website</a>
    </div>
    <div style="background: #f5f5f5; padding: 35px; margin-top: 40px; border-top: 4px solid #007a3d;">
      <div style="background: {bg}; border: 3px solid {border}; padding: 25px; border-radius: 6px;">
        <div style="font-size: 18px; font-weight: 700; color: {text}; margin-bottom: 12px;">VERIFIED BY DEPARTMENT OF HOME AFFAIRS</div>
        <div style="font-size: 14px; color: #212529; line-height: 1.8;">
          This {document_type} has been authenticated against official DHA records.<br>
          <strong>Verification Date:</strong> {verification_date}<br>
          <strong>Status:</strong> {status_text}<br>
          <strong>System:</strong> National Population Register (NPR)
        </div>
      </div>
      <div style="margin-top: 30px; padding: 25px; background: white; border: 2px solid #007a3d; border-radius: 6px;">
        <h4 style="color: #007a3d; font-size: 15px; margin-bottom: 15px;">Official Contact Information</h4>
        <p style="font-size: 14px; line-height: 2;">
          <strong>Email:</strong> callcentre@dha.gov.za<br>
          <strong>Website:</strong> www.dha.gov.za<br>
          <strong>Contact Centre:</strong> 0800 60 11 90<br>
          <strong>Office Hours:</strong> Monday - Friday, 08:00 - 16:00 (SAST)
        </p>
      </div>
    </div>
  </div>
</div>
<div style="text-align: center; padding: 25px; color: #757575; font-size: 12px;">
  <p style="font-weight: 600;">&copy; {year} Department of Home Affairs, Republic of South Africa</p>
  <p style="margin-top: 8px; font-size: 11px;">All Rights Reserved | Protected under South African Law</p>
</div>
</body>
</html>"#,
        full_name = escape(&full_name),
        bg = colors.background,
        border = colors.text,
        text = colors.text,
        icon = colors.icon,
        mark = colors.mark,
        status_text = status.as_str(),
        document_type = escape(record.document_type.as_str()),
        reference = escape(reference),
        passport_section = optional_section("PASSPORT NUMBER", &record.passport),
        id_section = optional_section("ID NUMBER", &id_number),
        issue_section = section("ISSUE DATE", &record.issue_date),
        expiry_section = section(
            "EXPIRY DATE",
            record.expiry_date.as_deref().unwrap_or("Permanent")
        ),
        nationality_section = optional_section("NATIONALITY", &record.nationality),
        category_section = section("CATEGORY", record.category.as_deref().unwrap_or("\u{2014}")),
        officer_sections = officer_grid(record),
        id = record.id,
        verification_url = escape(&verification_url),
        verification_date = verification_date,
        year = today.format("%Y"),
    )
}

fn officer_grid(record: &PermitRecord) -> String {
    let Some(officer) = record.officer_name.as_deref().filter(|s| !s.is_empty()) else {
        return String::new();
    };
    format!(
        r#"<div class="info-grid">{}{}</div>"#,
        section("ISSUING OFFICER", officer),
        section(
            "OFFICER ID",
            record.officer_id.as_deref().unwrap_or("\u{2014}")
        )
    )
}

/// Branded page for verification requests that match no record.
pub fn not_found_page() -> String {
    r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<title>Document Not Found - DHA Verification</title>
<style>
body { font-family: 'Helvetica Neue', Helvetica, Arial, sans-serif; background: #f5f5f5; padding: 20px; }
.container { max-width: 600px; margin: 60px auto; background: white; border: 1px solid #ddd; padding: 40px; text-align: center; }
.dha-title { color: #007a3d; font-size: 22px; font-weight: 700; text-transform: uppercase; }
.badge { background: #f1d4d4; border: 3px solid #cc0000; color: #cc0000; padding: 15px 30px; border-radius: 8px; font-size: 20px; font-weight: 800; display: inline-block; margin: 30px 0; }
p { color: #333; line-height: 1.7; }
</style>
</head>
<body>
<div class="container">
  <div class="dha-title">Department of Home Affairs</div>
  <div class="badge">DOCUMENT NOT FOUND</div>
  <p>No document matching this reference exists in the verification system.</p>
  <p>For assistance contact the DHA Contact Centre on 0800 60 11 90.</p>
</div>
</body>
</html>"#
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::DocumentType;

    fn record(expiry: Option<&str>) -> PermitRecord {
        PermitRecord {
            id: 3,
            document_type: DocumentType::GeneralWorkPermit,
            name: Some("Ayesha Khan".into()),
            permit_number: Some("WP/JHB/2024/08/55021".into()),
            issue_date: "2024-08-15".into(),
            expiry_date: expiry.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn valid_documents_render_green() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let html = verification_page(&record(Some("2029-08-14")), "http://localhost:5000", today);
        assert!(html.contains("DOCUMENT VALID"));
        assert!(html.contains("#007a3d"));
        assert!(!html.contains("DOCUMENT EXPIRED"));
    }

    #[test]
    fn expired_documents_render_red() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let html = verification_page(&record(Some("2024-12-31")), "http://localhost:5000", today);
        assert!(html.contains("DOCUMENT EXPIRED"));
        assert!(html.contains("#cc0000"));
    }

    #[test]
    fn page_links_record_qr_and_reference() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let html = verification_page(&record(None), "http://localhost:5000", today);
        assert!(html.contains("/permits/3/qr"));
        assert!(html.contains("WP/JHB/2024/08/55021"));
        assert!(html.contains("Ayesha Khan"));
    }

    #[test]
    fn html_special_characters_are_escaped() {
        let mut r = record(None);
        r.name = Some("<script>alert(1)</script>".into());
        let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let html = verification_page(&r, "http://localhost:5000", today);
        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;"));
    }
}

//! Drawn (vector) layouts for each known document type.
//!
//! These reproduce the departmental document formats field by field. A
//! value the record does not carry is printed as an em-dash; nothing is
//! ever fabricated to fill a blank.

use super::page::PageWriter;
use crate::assets::AssetStore;
use crate::record::PermitRecord;

const GREEN: (f32, f32, f32) = (0.0, 0.478, 0.239);
const GOLD: (f32, f32, f32) = (1.0, 0.843, 0.0);
const RED: (f32, f32, f32) = (0.8, 0.0, 0.0);
const BLACK: (f32, f32, f32) = (0.0, 0.0, 0.0);
const GRAY: (f32, f32, f32) = (0.4, 0.4, 0.4);

/// Printed in place of a value the record does not carry.
const MISSING: &str = "\u{2014}";

fn shown(value: &Option<String>) -> String {
    match value.as_deref() {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => MISSING.to_string(),
    }
}

fn shown_or(value: &Option<String>, default: &str) -> String {
    match value.as_deref() {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => default.to_string(),
    }
}

/// Rough centering for builtin Helvetica; good enough for headings.
fn center_x(text: &str, size: f32, left: f32, width: f32) -> f32 {
    let estimated = text.chars().count() as f32 * size * 0.55;
    left + (width - estimated).max(0.0) / 2.0
}

fn set_color(page: &PageWriter, (r, g, b): (f32, f32, f32)) {
    page.set_color(r, g, b);
}

/// Departmental letterhead: seal, ministry name, national banner, title.
pub(super) fn header(page: &PageWriter, assets: &AssetStore, title: &str) {
    if let Some(coat) = assets.coat_of_arms() {
        if let Err(e) = page.image(&coat, 460.0, 45.0, 60.0, 60.0) {
            tracing::debug!(error = %e, "coat of arms not drawable");
        }
    }

    set_color(page, GREEN);
    page.text("DEPARTMENT OF HOME AFFAIRS", 22.0, 50.0, 50.0, &page.fonts.bold);
    set_color(page, (0.2, 0.2, 0.2));
    page.text("Republic of South Africa", 10.0, 50.0, 75.0, &page.fonts.regular);

    page.set_stroke(GREEN.0, GREEN.1, GREEN.2, 3.0);
    page.hline(50.0, 545.0, 96.5);
    page.set_stroke(GOLD.0, GOLD.1, GOLD.2, 2.0);
    page.hline(50.0, 545.0, 99.0);

    set_color(page, BLACK);
    page.text(
        title,
        16.0,
        center_x(title, 16.0, 50.0, 495.0),
        115.0,
        &page.fonts.bold,
    );
}

/// One "Label:   value" row in the ledger style shared by several layouts.
fn row(page: &PageWriter, label: &str, value: String, y: f32) {
    page.text(label, 10.0, 50.0, y, &page.fonts.bold);
    page.text(value, 10.0, 200.0, y, &page.fonts.regular);
}

pub(super) fn permanent_residence(page: &PageWriter, record: &PermitRecord, assets: &AssetStore) {
    let coat = assets.coat_of_arms();
    if let Some(coat) = &coat {
        let _ = page.image(coat, 50.0, 40.0, 70.0, 70.0);
    }

    set_color(page, BLACK);
    page.text("home affairs", 18.0, 140.0, 45.0, &page.fonts.bold);
    set_color(page, (0.2, 0.2, 0.2));
    page.text("Department", 9.0, 140.0, 68.0, &page.fonts.regular);
    page.text("Home Affairs", 9.0, 140.0, 80.0, &page.fonts.regular);
    page.text("REPUBLIC OF SOUTH AFRICA", 9.0, 140.0, 92.0, &page.fonts.regular);
    set_color(page, BLACK);
    page.text("DHA-802", 11.0, 500.0, 45.0, &page.fonts.bold);

    let mut y = 130.0;
    page.text("PERMANENT RESIDENCE PERMIT", 15.0, 50.0, y, &page.fonts.bold);
    y += 20.0;
    set_color(page, GRAY);
    page.text(
        "SECTIONS 26 AND 27 OF ACT NO. 13 OF 2002",
        8.0,
        50.0,
        y,
        &page.fonts.regular,
    );
    y += 40.0;

    let left = 50.0;
    let right = 340.0;
    page.set_stroke(0.0, 0.0, 0.0, 1.0);

    set_color(page, BLACK);
    page.text("PERMIT NUMBER", 9.0, left, y, &page.fonts.bold);
    page.text("REFERENCE NO", 9.0, right, y, &page.fonts.bold);
    page.hline(left, left + 250.0, y + 28.0);
    page.hline(right, right + 205.0, y + 28.0);
    page.text(shown(&record.permit_number), 10.0, left, y + 16.0, &page.fonts.regular);
    page.text(
        shown(&record.reference_number.clone().or_else(|| record.permit_number.clone())),
        10.0,
        right,
        y + 16.0,
        &page.fonts.regular,
    );
    y += 50.0;

    page.text(
        "In terms of the provisions of section 27(b) of the Immigration Act, 2002 (Act No. 13 of 2002),",
        8.0,
        50.0,
        y,
        &page.fonts.regular,
    );
    y += 25.0;

    let mut underlined = |label: &str, value: String| {
        page.text(label, 9.0, left, y, &page.fonts.bold);
        page.hline(left, 545.0, y + 28.0);
        page.text(value, 10.0, left, y + 16.0, &page.fonts.regular);
        y += 45.0;
    };
    let surname = record
        .surname
        .clone()
        .or_else(|| {
            record
                .name
                .as_deref()?
                .split_whitespace()
                .last()
                .map(str::to_string)
        })
        .unwrap_or_default();
    underlined("Surname", surname.to_uppercase());
    underlined(
        "Maiden Surname",
        record.maiden_surname.clone().unwrap_or_default().to_uppercase(),
    );
    let forename = record
        .forename
        .clone()
        .or_else(|| {
            let words: Vec<&str> = record.name.as_deref()?.split_whitespace().collect();
            (words.len() > 1).then(|| words[..words.len() - 1].join(" "))
        })
        .unwrap_or_default();
    underlined("First Name (s)", forename.to_uppercase());
    underlined(
        "Nationality",
        record.nationality.clone().unwrap_or_default().to_uppercase(),
    );

    page.text("Date of birth", 9.0, left, y, &page.fonts.bold);
    page.text("Gender", 9.0, right, y, &page.fonts.bold);
    page.hline(left, left + 250.0, y + 28.0);
    page.hline(right, 545.0, y + 28.0);
    page.text(shown(&record.date_of_birth), 10.0, left, y + 16.0, &page.fonts.regular);
    page.text(
        record.gender.clone().unwrap_or_default().to_uppercase(),
        10.0,
        right,
        y + 16.0,
        &page.fonts.regular,
    );
    y += 45.0;

    for line in [
        "has been authorised to enter the Republic of South Africa for the purpose of taking up permanent residence, or if he/she on",
        "the date of approval of application, already sojourns therein legally, to reside permanently. Unless the holder of this permit",
        "enters the Republic of South Africa for the purpose of permanent residence",
        "before or on _____________ the permanent residence permit shall lapse.",
    ] {
        page.text(line, 8.0, 50.0, y, &page.fonts.regular);
        y += 12.0;
    }
    y += 28.0;

    page.text("Date of issue", 9.0, left, y, &page.fonts.bold);
    page.hline(left + 80.0, left + 200.0, y + 18.0);
    page.text(
        record.issue_date.clone(),
        10.0,
        left + 80.0,
        y + 6.0,
        &page.fonts.regular,
    );
    y += 50.0;

    office_stamp(page, record, coat.as_deref(), 310.0, y - 35.0);
    signature_block(page, left, 310.0, y + 45.0);
    y += 90.0;

    page.set_stroke(0.0, 0.0, 0.0, 1.0);
    page.hline(left, left + 200.0, y);
    page.hline(right - 20.0, 545.0, y);
    set_color(page, GRAY);
    page.text("Date printed", 8.0, left + 50.0, y + 8.0, &page.fonts.oblique);
    page.text(
        "Printed by: (system code)",
        8.0,
        right + 30.0,
        y + 8.0,
        &page.fonts.oblique,
    );
    y += 45.0;

    set_color(page, BLACK);
    page.text("Conditions", 9.0, left, y, &page.fonts.bold);
    y += 18.0;
    let numerals = ["(i)", "(ii)", "(iii)", "(iv)", "(v)"];
    for (i, condition) in record.conditions.iter().take(numerals.len()).enumerate() {
        page.text(
            format!("{}  {}", numerals[i], condition),
            8.0,
            50.0,
            y,
            &page.fonts.regular,
        );
        y += 12.0;
    }

    // Bottom strip: control number, barcode glyphs, imaging footer.
    let y = 745.0;
    page.text("Control Number", 9.0, 420.0, y, &page.fonts.bold);
    page.text(shown(&record.control_number), 11.0, 490.0, y + 18.0, &page.fonts.bold);
    page.text(
        shown_or(&record.barcode, "||||| |||| ||| |||| ||| ||| ||||"),
        20.0,
        50.0,
        y + 10.0,
        &page.fonts.mono_bold,
    );
    set_color(page, (0.6, 0.6, 0.6));
    page.text(
        "Imaging House Tel: (012) 3484400",
        6.0,
        50.0,
        y + 35.0,
        &page.fonts.regular,
    );
}

/// Double-bordered red office stamp with the seal and office address.
fn office_stamp(page: &PageWriter, record: &PermitRecord, coat: Option<&[u8]>, x: f32, y: f32) {
    page.set_stroke(RED.0, RED.1, RED.2, 1.5);
    page.rect(x, y, 225.0, 100.0);
    page.rect(x + 2.0, y + 2.0, 221.0, 96.0);

    if let Some(coat) = coat {
        let _ = page.image(coat, x + 87.0, y + 5.0, 50.0, 50.0);
    }

    set_color(page, RED);
    page.text("Office stamp", 7.0, x + 90.0, y + 58.0, &page.fonts.oblique);
    let office = shown_or(&record.issuing_office, "DEPARTMENT OF HOME AFFAIRS");
    page.text(
        "DEPARTMENT OF HOME AFFAIRS",
        9.0,
        center_x("DEPARTMENT OF HOME AFFAIRS", 9.0, x + 20.0, 185.0),
        y + 70.0,
        &page.fonts.bold,
    );
    page.text(
        "PRIVATE BAG X114",
        8.0,
        center_x("PRIVATE BAG X114", 8.0, x + 20.0, 185.0),
        y + 82.0,
        &page.fonts.bold,
    );
    page.text(
        office.clone(),
        9.0,
        center_x(&office, 9.0, x + 20.0, 185.0),
        y + 92.0,
        &page.fonts.bold,
    );
    page.text(
        "PRETORIA  0001",
        7.0,
        center_x("PRETORIA  0001", 7.0, x + 20.0, 185.0),
        y + 104.0,
        &page.fonts.regular,
    );
    page.text("07", 10.0, x + 200.0, y + 85.0, &page.fonts.bold);
}

fn signature_block(page: &PageWriter, left: f32, stamp_x: f32, sig_y: f32) {
    page.set_stroke(0.0, 0.0, 0.0, 1.0);
    page.hline(left, left + 200.0, sig_y);
    set_color(page, BLACK);
    page.text("Makhode", 16.0, left + 5.0, sig_y - 18.0, &page.fonts.times_italic);
    page.text("DIRECTOR-GENERAL", 8.0, left, sig_y + 8.0, &page.fonts.bold);
    page.text(
        "DEPARTMENT OF HOME AFFAIRS",
        8.0,
        left,
        sig_y + 23.0,
        &page.fonts.regular,
    );

    page.text("Makhode LT", 11.0, stamp_x + 65.0, sig_y - 22.0, &page.fonts.bold);
    page.hline(stamp_x + 50.0, stamp_x + 175.0, sig_y);
    set_color(page, GRAY);
    page.text(
        "Surname and Initials",
        7.0,
        stamp_x + 63.0,
        sig_y + 5.0,
        &page.fonts.oblique,
    );
}

pub(super) fn work_permit(page: &PageWriter, record: &PermitRecord, assets: &AssetStore) {
    header(page, assets, "GENERAL WORK VISA SECTION 19(2)");
    set_color(page, BLACK);

    let mut y = 170.0;
    row(page, "Control No.", shown(&record.control_number), y);
    y += 20.0;
    row(page, "Ref No:", shown(&record.permit_number), y);
    y += 30.0;
    row(page, "Name:", record.full_name().to_uppercase(), y);
    y += 20.0;
    row(page, "Passport No:", shown(&record.passport), y);
    y += 20.0;
    row(page, "No. of Entries:", "MULTIPLE".to_string(), y);
    y += 20.0;
    row(page, "Issued at:", shown_or(&record.issuing_office, "HEAD OFFICE"), y);
    y += 20.0;
    row(page, "VISA Expiry Date:", shown(&record.expiry_date), y);
    y += 20.0;
    row(page, "ON:", record.issue_date.clone(), y);
    y += 40.0;

    y = conditions_list(page, record, y, &[
        "(1) To take up employment in the category mentioned above",
        "(2) The above permit holder does not become a permanent resident",
    ]);

    y += 80.0;
    set_color(page, BLACK);
    page.text("Director-General: Home Affairs", 8.0, 50.0, y, &page.fonts.regular);
}

pub(super) fn relatives_permit(page: &PageWriter, record: &PermitRecord, assets: &AssetStore) {
    header(page, assets, "RELATIVE'S VISA (SPOUSE)");
    set_color(page, BLACK);

    let mut y = 170.0;
    row(page, "Control No.", shown(&record.control_number), y);
    y += 20.0;
    row(page, "Ref No:", shown(&record.permit_number), y);
    y += 30.0;
    row(page, "Name:", record.full_name().to_uppercase(), y);
    y += 20.0;
    row(page, "Passport No:", shown(&record.passport), y);
    y += 20.0;
    row(page, "Valid From:", record.issue_date.clone(), y);
    y += 20.0;
    row(page, "VISA Expiry Date:", shown(&record.expiry_date), y);
    y += 40.0;

    y = conditions_list(page, record, y, &[
        "(1) To reside with SA citizen or PR holder: ID/PRP number: __________",
        "(2) May not conduct work",
        "(3) Subject to Reg. 3(7)",
    ]);

    y += 80.0;
    set_color(page, BLACK);
    page.text(
        "For Director-General: Home Affairs",
        8.0,
        50.0,
        y,
        &page.fonts.regular,
    );
}

/// Conditions heading plus the record's own conditions, or the statutory
/// defaults for the type when the record carries none.
fn conditions_list(page: &PageWriter, record: &PermitRecord, mut y: f32, defaults: &[&str]) -> f32 {
    page.text("Conditions:", 9.0, 50.0, y, &page.fonts.bold);
    set_color(page, (0.2, 0.2, 0.2));
    y += 15.0;
    if record.conditions.is_empty() {
        for line in defaults {
            page.text(*line, 8.0, 50.0, y, &page.fonts.regular);
            y += 15.0;
        }
    } else {
        for (i, condition) in record.conditions.iter().enumerate() {
            page.text(
                format!("({}) {}", i + 1, condition),
                8.0,
                50.0,
                y,
                &page.fonts.regular,
            );
            y += 15.0;
        }
    }
    y
}

pub(super) fn birth_certificate(page: &PageWriter, record: &PermitRecord, assets: &AssetStore) {
    header(page, assets, "BIRTH CERTIFICATE");

    set_color(page, GRAY);
    let caption = "IDENTITY NUMBER (birth/adoption)";
    page.text(
        caption,
        9.0,
        center_x(caption, 9.0, 50.0, 495.0),
        150.0,
        &page.fonts.regular,
    );
    set_color(page, BLACK);
    let identity = shown(&record.identity_number);
    page.text(
        identity.clone(),
        12.0,
        center_x(&identity, 12.0, 50.0, 495.0),
        165.0,
        &page.fonts.bold,
    );

    let mut y = 200.0;
    page.text("CHILD", 10.0, 50.0, y, &page.fonts.bold);
    y += 20.0;

    fn indented_row(page: &PageWriter, label: &str, value: String, y: &mut f32) {
        page.text(label, 10.0, 70.0, *y, &page.fonts.bold);
        page.text(value, 10.0, 200.0, *y, &page.fonts.regular);
        *y += 20.0;
    }
    indented_row(page, "SURNAME:", shown(&record.surname), &mut y);
    indented_row(page, "FORENAME(S):", shown(&record.forename), &mut y);
    indented_row(page, "IDENTITY NUMBER:", shown(&record.identity_number), &mut y);
    y += 10.0;
    indented_row(page, "GENDER:", shown(&record.gender), &mut y);
    indented_row(page, "DATE OF BIRTH:", shown(&record.date_of_birth), &mut y);
    indented_row(page, "PLACE OF BIRTH:", shown(&record.place_of_birth), &mut y);
    indented_row(
        page,
        "COUNTRY OF BIRTH:",
        shown_or(&record.country_of_birth, "SOUTH AFRICA"),
        &mut y,
    );

    if let Some(parents) = &record.parent_info {
        for (heading, parent) in [("MOTHER", &parents.mother), ("FATHER", &parents.father)] {
            let Some(parent) = parent else { continue };
            y += 10.0;
            page.text(heading, 10.0, 50.0, y, &page.fonts.bold);
            y += 20.0;
            indented_row(page, "SURNAME:", shown(&parent.surname), &mut y);
            indented_row(page, "FORENAME(S):", shown(&parent.forename), &mut y);
            indented_row(page, "IDENTITY NUMBER:", shown(&parent.id_number), &mut y);
        }
    }

    y += 20.0;
    set_color(page, GRAY);
    page.text("DIRECTOR GENERAL: HOME AFFAIRS", 8.0, 50.0, y, &page.fonts.regular);

    set_color(page, GREEN);
    page.text(
        format!("Control Number: {}", shown(&record.reference_number)),
        8.0,
        50.0,
        750.0,
        &page.fonts.regular,
    );
}

pub(super) fn naturalization(page: &PageWriter, record: &PermitRecord, _assets: &AssetStore) {
    set_color(page, BLACK);
    let title = "Certificate of Naturalisation";
    page.text(
        title,
        18.0,
        center_x(title, 18.0, 50.0, 495.0),
        100.0,
        &page.fonts.times_bold,
    );
    let subtitle = "Republic of South Africa";
    page.text(
        subtitle,
        16.0,
        center_x(subtitle, 16.0, 50.0, 495.0),
        130.0,
        &page.fonts.times_bold,
    );
    set_color(page, GRAY);
    let act = "(Section 5, South African Citizenship Act, 1995)";
    page.text(
        act,
        10.0,
        center_x(act, 10.0, 50.0, 495.0),
        160.0,
        &page.fonts.times_italic,
    );

    set_color(page, BLACK);
    let mut y = 200.0;
    for line in [
        "In terms of the powers conferred on him by the South African Citizenship Act, 1995",
        "(Act 88 of 1995), the Minister of Home Affairs has been pleased to grant this certificate to",
    ] {
        page.text(line, 10.0, 50.0, y, &page.fonts.times);
        y += 14.0;
    }

    y += 52.0;
    let name = record.full_name().to_uppercase();
    let name = if name.is_empty() {
        "__________________________".to_string()
    } else {
        name
    };
    page.text(
        name.clone(),
        14.0,
        center_x(&name, 14.0, 50.0, 495.0),
        y,
        &page.fonts.times_bold,
    );

    y += 60.0;
    for line in [
        "and to declare hereby that the holder of this certificate shall henceforth be a",
        "South African citizen by naturalisation.",
    ] {
        page.text(line, 10.0, 50.0, y, &page.fonts.times);
        y += 14.0;
    }

    y += 46.0;
    let order = "By Order of the Minister";
    page.text(
        order,
        10.0,
        center_x(order, 10.0, 50.0, 495.0),
        y,
        &page.fonts.times_italic,
    );

    y += 100.0;
    page.text("PRETORIA", 9.0, 50.0, y, &page.fonts.times);
    page.text(
        "Director-General: Home Affairs",
        9.0,
        400.0,
        y,
        &page.fonts.times,
    );

    y += 30.0;
    page.text(
        format!("Certificate number: {}", shown(&record.permit_number)),
        9.0,
        50.0,
        y,
        &page.fonts.times,
    );
    y += 15.0;
    page.text(
        format!("Reference number: {}", shown(&record.reference_number)),
        9.0,
        50.0,
        y,
        &page.fonts.times,
    );

    set_color(page, GREEN);
    page.text(
        format!("Control Number: {}", shown(&record.control_number)),
        8.0,
        50.0,
        750.0,
        &page.fonts.regular,
    );
}

pub(super) fn refugee_status(page: &PageWriter, record: &PermitRecord, assets: &AssetStore) {
    header(page, assets, "FORMAL RECOGNITION OF REFUGEE STATUS IN THE RSA");

    let mut y = 170.0;
    set_color(page, GRAY);
    let caption = "PARTICULARS OF RECOGNISED REFUGEE IN THE RSA";
    page.text(
        caption,
        9.0,
        center_x(caption, 9.0, 50.0, 495.0),
        y,
        &page.fonts.regular,
    );
    y += 30.0;

    set_color(page, BLACK);
    row(page, "NAME AND SURNAME:", record.full_name(), y);
    y += 20.0;
    row(page, "NATIONALITY:", shown(&record.nationality), y);
    y += 20.0;
    row(page, "EDUCATION:", shown(&record.education), y);
    y += 20.0;
    row(page, "DATE OF BIRTH:", shown(&record.date_of_birth), y);
    y += 20.0;
    row(
        page,
        "COUNTRY OF BIRTH:",
        shown(&record.country_of_birth.clone().or_else(|| record.nationality.clone())),
        y,
    );
    y += 30.0;

    set_color(page, GRAY);
    for line in [
        "It is hereby certified that the person whose description above has, in reality of Section 27 (b) of the",
        "Refugees Act 1998 (Act 130 of 1998), been recognized as a refugee in the Republic of South Africa.",
    ] {
        page.text(line, 8.0, 50.0, y, &page.fonts.regular);
        y += 11.0;
    }
    y += 28.0;

    set_color(page, BLACK);
    row(
        page,
        "FILE NO:",
        shown(&record.file_number.clone().or_else(|| record.permit_number.clone())),
        y,
    );
    y += 20.0;
    row(page, "DATE ISSUED:", record.issue_date.clone(), y);
    y += 40.0;

    page.text("ISSUING OFFICE:", 8.0, 50.0, y, &page.fonts.regular);
    page.text(
        shown_or(&record.issuing_office, "DEPARTMENT OF HOME AFFAIRS"),
        8.0,
        50.0,
        y + 15.0,
        &page.fonts.regular,
    );
    y += 100.0;

    set_color(page, GRAY);
    let contact = "For verification of this document, please contact DHA";
    page.text(
        contact,
        7.0,
        center_x(contact, 7.0, 50.0, 495.0),
        y,
        &page.fonts.regular,
    );
    let email = shown_or(&record.verification_email, "asmverifications@dha.gov.za");
    page.text(
        email.clone(),
        7.0,
        center_x(&email, 7.0, 50.0, 495.0),
        y + 12.0,
        &page.fonts.regular,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_values_render_as_dash_never_invented() {
        assert_eq!(shown(&None), "\u{2014}");
        assert_eq!(shown(&Some(String::new())), "\u{2014}");
        assert_eq!(shown(&Some("AA1234567".into())), "AA1234567");
    }

    #[test]
    fn defaults_apply_only_when_absent() {
        assert_eq!(shown_or(&None, "HEAD OFFICE"), "HEAD OFFICE");
        assert_eq!(shown_or(&Some("CAPE TOWN".into()), "HEAD OFFICE"), "CAPE TOWN");
    }

    #[test]
    fn centering_never_goes_left_of_origin() {
        let long = "X".repeat(400);
        assert_eq!(center_x(&long, 16.0, 50.0, 495.0), 50.0);
    }
}

//! Integration tests for PDF and QR rendering across every document type.

use permit_office::assets::AssetStore;
use permit_office::record::{DocumentType, ParentInfo, ParentName, PermitRecord};
use permit_office::render::{self, qr, RenderOptions};

const VERIFY_URL: &str = "http://localhost:5000/permits/1/verify-document";

fn assets() -> AssetStore {
    // No template images on disk; every render exercises the drawn layouts.
    AssetStore::new("missing-assets-dir".to_string())
}

fn record(document_type: DocumentType) -> PermitRecord {
    PermitRecord {
        id: 1,
        document_type,
        name: Some("Muhammad Mohsin".to_string()),
        surname: Some("MOHSIN".to_string()),
        forename: Some("MUHAMMAD".to_string()),
        passport: Some("AB1234567".to_string()),
        permit_number: Some("PR/PTA/2025/10/13459".to_string()),
        nationality: Some("PAKISTANI".to_string()),
        date_of_birth: Some("1990-03-12".to_string()),
        gender: Some("M".to_string()),
        issue_date: "2025-10-13".to_string(),
        expiry_date: Some("Indefinite".to_string()),
        ..Default::default()
    }
}

fn assert_is_pdf(bytes: &[u8]) {
    assert!(bytes.len() > 1000, "suspiciously small PDF: {}", bytes.len());
    assert_eq!(&bytes[..5], b"%PDF-");
}

/// Builtin-font text lands in the uncompressed content stream as uppercase
/// hex string operands (`<4E414D45> Tj`), so the needle is hex-encoded first.
fn contains_text(pdf: &[u8], needle: &str) -> bool {
    let hex: String = needle.bytes().map(|b| format!("{b:02X}")).collect();
    pdf.windows(hex.len()).any(|w| w == hex.as_bytes())
}

#[test]
fn every_known_type_renders_a_pdf() {
    let assets = assets();
    for document_type in [
        DocumentType::PermanentResidence,
        DocumentType::GeneralWorkPermit,
        DocumentType::RelativesPermit,
        DocumentType::BirthCertificate,
        DocumentType::NaturalizationCertificate,
        DocumentType::RefugeeStatus,
    ] {
        let record = record(document_type.clone());
        let pdf = render::render_pdf(&record, &assets, VERIFY_URL, RenderOptions::default())
            .unwrap_or_else(|e| panic!("{document_type} failed to render: {e}"));
        assert_is_pdf(&pdf);
    }
}

#[test]
fn unknown_type_uses_the_generic_layout() {
    let record = record(DocumentType::Other("Critical Skills Work Visa".to_string()));
    let pdf = render::render_pdf(&record, &assets(), VERIFY_URL, RenderOptions::default())
        .expect("generic render");
    assert_is_pdf(&pdf);
    // Every present field's label appears in the dump, plus the type title.
    for label in [
        "NAME",
        "PASSPORT",
        "PERMIT NUMBER",
        "NATIONALITY",
        "DATE OF BIRTH",
        "GENDER",
        "ISSUE DATE",
        "EXPIRY DATE",
    ] {
        assert!(contains_text(&pdf, label), "missing label {label}");
    }
    assert!(contains_text(&pdf, "Critical Skills Work Visa"));
}

#[test]
fn force_generic_overrides_type_layouts() {
    let record = record(DocumentType::PermanentResidence);
    let options = RenderOptions {
        force_generic: true,
        ..Default::default()
    };
    let pdf = render::render_pdf(&record, &assets(), VERIFY_URL, options).expect("forced generic");
    assert_is_pdf(&pdf);
}

#[test]
fn sparse_records_still_render() {
    // Only the mandatory fields; absent values must never be invented.
    let record = PermitRecord {
        id: 99,
        document_type: DocumentType::PermanentResidence,
        issue_date: "2025-01-01".to_string(),
        ..Default::default()
    };
    let pdf = render::render_pdf(&record, &assets(), VERIFY_URL, RenderOptions::default())
        .expect("sparse render");
    assert_is_pdf(&pdf);
}

#[test]
fn birth_certificate_renders_parent_sections() {
    let mut record = record(DocumentType::BirthCertificate);
    record.identity_number = Some("2203125489081".to_string());
    record.parent_info = Some(ParentInfo {
        mother: Some(ParentName {
            surname: Some("ALLY".to_string()),
            forename: Some("FATIMA".to_string()),
            id_number: Some("8806120456087".to_string()),
        }),
        father: Some(ParentName {
            surname: Some("ALLY".to_string()),
            forename: Some("MAHMOOD".to_string()),
            id_number: Some("8504155367082".to_string()),
        }),
    });
    let pdf = render::render_pdf(&record, &assets(), VERIFY_URL, RenderOptions::default())
        .expect("birth certificate render");
    assert_is_pdf(&pdf);
}

#[test]
fn qr_codes_are_png_images() {
    let png = qr::qr_png(VERIFY_URL).expect("qr render");
    assert_eq!(&png[..8], &[0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n']);
}

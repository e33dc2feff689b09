//! Static record store: the guaranteed fallback data set and lookup ops.
//!
//! The seed set covers every supported document type so the service can
//! always produce a document even when every upstream source is down.
//! Lookups are linear scans; record counts are tens, not millions.

use crate::record::{DocumentType, ParentInfo, ParentName, PermitRecord};

/// Find a record by its numeric id.
pub fn find_by_id(records: &[PermitRecord], id: u64) -> Option<&PermitRecord> {
    records.iter().find(|r| r.id == id)
}

/// Find a record by permit number, reference number or file number,
/// in that priority order. No match is a normal outcome, not an error.
pub fn find_by_number<'a>(records: &'a [PermitRecord], number: &str) -> Option<&'a PermitRecord> {
    records.iter().find(|r| {
        r.permit_number.as_deref() == Some(number)
            || r.reference_number.as_deref() == Some(number)
            || r.file_number.as_deref() == Some(number)
    })
}

const PR_CONDITIONS: [&str; 2] = [
    "This permit is issued once only and must be duly safeguarded.",
    "Permanent residents who are absent from the Republic for three years or longer may forfeit their right to permanent residence in the Republic.",
];

fn pr_officer(record: PermitRecord) -> PermitRecord {
    PermitRecord {
        officer_name: Some("M. Naidoo".into()),
        officer_id: Some("DHA-BO-2025-001".into()),
        ..record
    }
}

/// The fixed fallback record set.
pub fn fallback_records() -> Vec<PermitRecord> {
    vec![
        pr_officer(PermitRecord {
            id: 1,
            name: Some("Muhammad Mohsin".into()),
            surname: Some("MOHSIN".into()),
            forename: Some("MUHAMMAD".into()),
            passport: Some("AD0110994".into()),
            document_type: DocumentType::PermanentResidence,
            issue_date: "2025-10-13".into(),
            expiry_date: Some("Indefinite".into()),
            status: Some("Issued".into()),
            permit_number: Some("PR/PTA/2025/10/13459".into()),
            reference_number: Some("PRP6296482".into()),
            control_number: Some("A629649".into()),
            nationality: Some("PAKISTANI".into()),
            date_of_birth: Some("23-06-1985".into()),
            gender: Some("MALE".into()),
            category: Some("Skilled Professional".into()),
            issuing_office: Some("DEPARTMENT OF HOME AFFAIRS, PRETORIA 0001".into()),
            conditions: PR_CONDITIONS.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }),
        pr_officer(PermitRecord {
            id: 2,
            name: Some("Ahmad Nadeem".into()),
            surname: Some("NADEEM".into()),
            forename: Some("AHMAD".into()),
            passport: Some("LS1158415".into()),
            document_type: DocumentType::PermanentResidence,
            issue_date: "2025-10-13".into(),
            expiry_date: Some("Indefinite".into()),
            status: Some("Issued".into()),
            permit_number: Some("PR/PTA/2025/10/13458".into()),
            reference_number: Some("PRP6296483".into()),
            control_number: Some("A629650".into()),
            nationality: Some("PAKISTANI".into()),
            date_of_birth: Some("15-08-1988".into()),
            gender: Some("MALE".into()),
            category: Some("Section 27(b) Immigration Act 2002".into()),
            issuing_office: Some("DEPARTMENT OF HOME AFFAIRS, PRETORIA 0001".into()),
            conditions: PR_CONDITIONS.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }),
        pr_officer(PermitRecord {
            id: 3,
            name: Some("Tasleem Mohsin".into()),
            passport: Some("AU0116281".into()),
            document_type: DocumentType::PermanentResidence,
            issue_date: "2025-10-16".into(),
            expiry_date: Some("Indefinite".into()),
            status: Some("Issued".into()),
            permit_number: Some("PR/PTA/2025/10/16790".into()),
            nationality: Some("Pakistani".into()),
            category: Some("Family Reunification".into()),
            ..Default::default()
        }),
        pr_officer(PermitRecord {
            id: 4,
            name: Some("Qusai Farid Hussein".into()),
            passport: Some("Q655884".into()),
            document_type: DocumentType::PermanentResidence,
            issue_date: "2025-10-16".into(),
            expiry_date: Some("Indefinite".into()),
            status: Some("Issued".into()),
            permit_number: Some("PR/PTA/2025/10/16792".into()),
            nationality: Some("Jordanian".into()),
            category: Some("Family Reunification".into()),
            ..Default::default()
        }),
        pr_officer(PermitRecord {
            id: 5,
            name: Some("Haroon Rashid".into()),
            passport: Some("DT9840361".into()),
            document_type: DocumentType::PermanentResidence,
            issue_date: "2025-10-13".into(),
            expiry_date: Some("Indefinite".into()),
            status: Some("Issued".into()),
            permit_number: Some("PR/PTA/2025/10/13456".into()),
            nationality: Some("Pakistani".into()),
            category: Some("Skilled Professional".into()),
            ..Default::default()
        }),
        pr_officer(PermitRecord {
            id: 6,
            name: Some("Khunsha Rashid".into()),
            passport: Some("KV4122911".into()),
            document_type: DocumentType::PermanentResidence,
            issue_date: "2025-10-13".into(),
            expiry_date: Some("Indefinite".into()),
            status: Some("Issued".into()),
            permit_number: Some("PR/PTA/2025/10/13457".into()),
            nationality: Some("Pakistani".into()),
            category: Some("Family Reunification".into()),
            ..Default::default()
        }),
        pr_officer(PermitRecord {
            id: 7,
            name: Some("Haris Faisal".into()),
            passport: Some("AF8918005".into()),
            document_type: DocumentType::PermanentResidence,
            issue_date: "2025-10-16".into(),
            expiry_date: Some("Indefinite".into()),
            status: Some("Issued".into()),
            permit_number: Some("PR/PTA/2025/10/16791".into()),
            nationality: Some("Pakistani".into()),
            category: Some("Business Investment".into()),
            ..Default::default()
        }),
        pr_officer(PermitRecord {
            id: 8,
            name: Some("Muhammad Hasnain Younis".into()),
            surname: Some("YOUNIS".into()),
            forename: Some("MUHAMMAD HASNAIN".into()),
            passport: Some("AV6905864".into()),
            document_type: DocumentType::PermanentResidence,
            issue_date: "2025-10-16".into(),
            expiry_date: Some("Indefinite".into()),
            status: Some("Issued".into()),
            permit_number: Some("PR/PTA/2025/10/16789".into()),
            reference_number: Some("PRP6296484".into()),
            control_number: Some("A629651".into()),
            nationality: Some("PAKISTANI".into()),
            date_of_birth: Some("01-01-1990".into()),
            gender: Some("MALE".into()),
            category: Some("Section 19(1) Critical Skills".into()),
            issuing_office: Some("DEPARTMENT OF HOME AFFAIRS, PRETORIA 0001".into()),
            conditions: PR_CONDITIONS.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }),
        PermitRecord {
            id: 9,
            name: Some("IKRAM IBRAHIM YUSUF MANSURI".into()),
            surname: Some("MANSURI".into()),
            forename: Some("IKRAM IBRAHIM YUSUF".into()),
            passport: Some("I0611989".into()),
            document_type: DocumentType::GeneralWorkPermit,
            issue_date: "2025-10-13".into(),
            expiry_date: Some("2028-10-13".into()),
            status: Some("Issued".into()),
            permit_number: Some("WP/PTA/2025/10/13001".into()),
            reference_number: Some("WP/PTA/2025/10/13001".into()),
            control_number: Some("A629649".into()),
            nationality: Some("INDIAN".into()),
            date_of_birth: Some("15-06-1985".into()),
            gender: Some("MALE".into()),
            category: Some("GENERAL WORK VISA SECTION 19(2)".into()),
            officer_name: Some("Director-General: Home Affairs".into()),
            officer_id: Some("DHA-1635".into()),
            issuing_office: Some("HEAD OFFICE".into()),
            conditions: vec![
                "(1) To take up employment in the category mentioned above".into(),
                "(2) The above permit holder does not become a permanent resident".into(),
            ],
            barcode: Some("A7927CS".into()),
            ..Default::default()
        },
        PermitRecord {
            id: 10,
            name: Some("ANISHA IKRAM MANSURI".into()),
            surname: Some("MANSURI".into()),
            forename: Some("ANISHA IKRAM".into()),
            passport: Some("U8725055".into()),
            document_type: DocumentType::RelativesPermit,
            issue_date: "2025-10-13".into(),
            expiry_date: Some("2028-10-13".into()),
            status: Some("Issued".into()),
            permit_number: Some("REL/PTA/2025/10/13001".into()),
            reference_number: Some("REL/PTA/2025/10/13001".into()),
            control_number: Some("AA0738519".into()),
            nationality: Some("INDIAN".into()),
            date_of_birth: Some("12-03-1988".into()),
            gender: Some("FEMALE".into()),
            category: Some("RELATIVE'S VISA (SPOUSE)".into()),
            officer_name: Some("For Director-General: Home Affairs".into()),
            officer_id: Some("DHA-1635".into()),
            issuing_office: Some("HEAD OFFICE".into()),
            conditions: vec![
                "(1) To reside with SA citizen or PR holder: ID/PRP number: ___________".into(),
                "(2) May not conduct work".into(),
                "(3) Subject to Reg. 3(7)".into(),
            ],
            barcode: Some("XB64XRJ".into()),
            ..Default::default()
        },
        PermitRecord {
            id: 11,
            name: Some("ZANEERAH ALLY".into()),
            surname: Some("ALLY".into()),
            forename: Some("ZANEERAH".into()),
            document_type: DocumentType::BirthCertificate,
            issue_date: "2024-11-15".into(),
            expiry_date: Some("N/A".into()),
            status: Some("Issued".into()),
            reference_number: Some("F7895390".into()),
            identity_number: Some("1403218075080".into()),
            gender: Some("FEMALE".into()),
            date_of_birth: Some("20-03-2014".into()),
            place_of_birth: Some("JOHANNESBURG".into()),
            country_of_birth: Some("SOUTH AFRICA".into()),
            nationality: Some("South African".into()),
            category: Some("Birth Registration".into()),
            officer_name: Some("DIRECTOR GENERAL: HOME AFFAIRS".into()),
            officer_id: Some("DHA-BO-2025-001".into()),
            issuing_office: Some("DEPARTMENT OF HOME AFFAIRS".into()),
            parent_info: Some(ParentInfo {
                mother: Some(ParentName {
                    surname: Some("ALLY".into()),
                    forename: Some("FATIMA".into()),
                    id_number: Some("8508251583187".into()),
                }),
                father: Some(ParentName {
                    surname: Some("ALLY".into()),
                    forename: Some("MAHMOOD".into()),
                    id_number: None,
                }),
            }),
            ..Default::default()
        },
        PermitRecord {
            id: 12,
            name: Some("Anna Munaf".into()),
            surname: Some("MUNAF".into()),
            forename: Some("ANNA".into()),
            id_number: Some("8508251583187".into()),
            document_type: DocumentType::NaturalizationCertificate,
            issue_date: "2025-10-16".into(),
            expiry_date: Some("Permanent".into()),
            status: Some("Issued".into()),
            permit_number: Some("NAT/PTA/2025/10/16001".into()),
            reference_number: Some("NAT2025016001".into()),
            control_number: Some("A0105998".into()),
            nationality: Some("South African".into()),
            date_of_birth: Some("25-08-1985".into()),
            gender: Some("FEMALE".into()),
            category: Some(
                "Citizenship by Naturalization (Section 5, South African Citizenship Act, 1995)"
                    .into(),
            ),
            officer_name: Some("Director-General: Home Affairs".into()),
            officer_id: Some("DHA-64E".into()),
            issuing_office: Some("PRETORIA".into()),
            certificate_number: Some("1631".into()),
            ..Default::default()
        },
        PermitRecord {
            id: 13,
            name: Some("FAATI ABDURAHMAN ISA".into()),
            surname: Some("ISA".into()),
            forename: Some("FAATI ABDURAHMAN".into()),
            passport: Some("PF4E8000026215".into()),
            document_type: DocumentType::RefugeeStatus,
            issue_date: "2025-10-13".into(),
            expiry_date: Some("2029-10-13".into()),
            status: Some("Issued".into()),
            permit_number: Some("REF/PTA/2025/10/13001".into()),
            file_number: Some("PTAERIO000020215".into()),
            reference_number: Some("REF/PTA/2025/10/13001".into()),
            nationality: Some("ERITREAN".into()),
            date_of_birth: Some("15-05-1990".into()),
            gender: Some("FEMALE".into()),
            education: Some("HIGH SCHOOL".into()),
            country_of_birth: Some("ERITREA".into()),
            category: Some("4-Year Refugee Permit".into()),
            officer_name: Some("ISSUING OFFICE".into()),
            officer_id: Some("DHA-BO-2025-004".into()),
            issuing_office: Some("DEPARTMENT OF HOME AFFAIRS".into()),
            verification_email: Some("asmverifications@dha.gov.za".into()),
            conditions: vec![
                "This certificate recognizes refugee status under Section 27(b) of the Refugees Act 1998 (Act 130 of 1998)".into(),
                "Valid for 4 years from date of issue".into(),
            ],
            ..Default::default()
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_set_covers_every_document_type() {
        let records = fallback_records();
        assert!(records.len() >= 13);
        for ty in [
            DocumentType::PermanentResidence,
            DocumentType::GeneralWorkPermit,
            DocumentType::RelativesPermit,
            DocumentType::BirthCertificate,
            DocumentType::NaturalizationCertificate,
            DocumentType::RefugeeStatus,
        ] {
            assert!(
                records.iter().any(|r| r.document_type == ty),
                "missing seed record for {ty}"
            );
        }
    }

    #[test]
    fn every_seed_record_resolves_by_primary_reference() {
        let records = fallback_records();
        for record in &records {
            let reference = record
                .primary_reference()
                .expect("seed record without a primary reference");
            let found = find_by_number(&records, reference)
                .expect("primary reference did not resolve");
            assert_eq!(found.id, record.id);
        }
    }

    #[test]
    fn find_by_number_checks_all_three_identifiers() {
        let records = fallback_records();
        // Record 13 carries a distinct file number.
        let by_file = find_by_number(&records, "PTAERIO000020215").unwrap();
        assert_eq!(by_file.id, 13);
        // Record 1 carries a distinct reference number.
        let by_ref = find_by_number(&records, "PRP6296482").unwrap();
        assert_eq!(by_ref.id, 1);
        assert!(find_by_number(&records, "NOPE").is_none());
    }

    #[test]
    fn find_by_id_misses_are_none() {
        let records = fallback_records();
        assert!(find_by_id(&records, 1).is_some());
        assert!(find_by_id(&records, 999).is_none());
    }
}

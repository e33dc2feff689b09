//! Document rendering: permit records to single-page A4 PDFs.
//!
//! Three strategies, tried in order per document type: overlay onto a
//! prebuilt template image, a drawn vector layout, and a generic field
//! dump for types nothing else knows. A verification QR code is stamped
//! last on every document, best-effort.

pub mod generic;
pub mod layouts;
pub mod page;
pub mod qr;
pub mod template;

use crate::assets::AssetStore;
use crate::record::{DocumentType, PermitRecord};
use page::PageWriter;

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("pdf backend: {0}")]
    Backend(String),
    #[error("qr encoding: {0}")]
    Qr(String),
}

#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    /// Overlay onto the prebuilt template image when one exists for the type.
    pub prefer_template: bool,
    /// Skip type-specific layouts entirely; render the generic field dump.
    pub force_generic: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            prefer_template: true,
            force_generic: false,
        }
    }
}

/// Rendering strategy for one known document type.
struct TypeLayout {
    title: &'static str,
    draw: fn(&PageWriter, &PermitRecord, &AssetStore),
    overlay: Option<&'static [template::OverlayField]>,
}

static PERMANENT_RESIDENCE: TypeLayout = TypeLayout {
    title: "PERMANENT RESIDENCE PERMIT",
    draw: layouts::permanent_residence,
    overlay: Some(template::PERMANENT_RESIDENCE_OVERLAY),
};

static WORK_PERMIT: TypeLayout = TypeLayout {
    title: "GENERAL WORK VISA SECTION 19(2)",
    draw: layouts::work_permit,
    overlay: Some(template::WORK_PERMIT_OVERLAY),
};

static RELATIVES_PERMIT: TypeLayout = TypeLayout {
    title: "RELATIVE'S VISA (SPOUSE)",
    draw: layouts::relatives_permit,
    overlay: Some(template::RELATIVES_PERMIT_OVERLAY),
};

static BIRTH_CERTIFICATE: TypeLayout = TypeLayout {
    title: "BIRTH CERTIFICATE",
    draw: layouts::birth_certificate,
    overlay: None,
};

static NATURALIZATION: TypeLayout = TypeLayout {
    title: "Certificate of Naturalisation",
    draw: layouts::naturalization,
    overlay: Some(template::NATURALIZATION_OVERLAY),
};

static REFUGEE_STATUS: TypeLayout = TypeLayout {
    title: "FORMAL RECOGNITION OF REFUGEE STATUS IN THE RSA",
    draw: layouts::refugee_status,
    overlay: None,
};

fn layout_for(document_type: &DocumentType) -> Option<&'static TypeLayout> {
    match document_type {
        DocumentType::PermanentResidence => Some(&PERMANENT_RESIDENCE),
        DocumentType::GeneralWorkPermit => Some(&WORK_PERMIT),
        DocumentType::RelativesPermit => Some(&RELATIVES_PERMIT),
        DocumentType::BirthCertificate => Some(&BIRTH_CERTIFICATE),
        DocumentType::NaturalizationCertificate => Some(&NATURALIZATION),
        DocumentType::RefugeeStatus => Some(&REFUGEE_STATUS),
        DocumentType::Other(_) => None,
    }
}

/// Render one record to PDF bytes. `verify_url` is encoded into the QR code.
pub fn render_pdf(
    record: &PermitRecord,
    assets: &AssetStore,
    verify_url: &str,
    options: RenderOptions,
) -> Result<Vec<u8>, RenderError> {
    let layout = layout_for(&record.document_type);
    let title = match layout {
        Some(l) => l.title.to_string(),
        None => {
            let s = record.document_type.as_str();
            if s.is_empty() {
                "OFFICIAL DOCUMENT".to_string()
            } else {
                s.to_string()
            }
        }
    };

    let page = PageWriter::new(&format!("{title} - {}", record.full_name()))?;

    let mut drawn = false;
    if !options.force_generic {
        if let Some(layout) = layout {
            if options.prefer_template {
                if let (Some(fields), Some(bytes)) = (
                    layout.overlay,
                    assets.template_bytes(&record.document_type),
                ) {
                    match template::overlay(&page, record, fields, &bytes) {
                        Ok(()) => drawn = true,
                        Err(e) => {
                            tracing::warn!(
                                document_type = %record.document_type,
                                error = %e,
                                "template overlay failed, using drawn layout"
                            );
                        }
                    }
                }
            }
            if !drawn {
                (layout.draw)(&page, record, assets);
                drawn = true;
            }
        }
    }
    if !drawn {
        generic::draw(&page, record, assets, &title);
    }

    qr::embed(&page, verify_url);
    page.finish()
}

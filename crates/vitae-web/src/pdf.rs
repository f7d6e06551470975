//! Minimal PDF writer for the CV export.
//!
//! Produces a single-font text document: Helvetica at a fixed leading, one
//! content stream per page. Enough for a readable attachment, not a
//! typesetter.

use axum::{
  extract::{Path, State},
  http::header,
  response::{IntoResponse, Response},
};
use minijinja::context;
use vitae_core::{cv::CurriculumVitae, store::CvStore};

use crate::{AppState, error::WebError, render::Templates};

// A4, in points.
const PAGE_WIDTH: u32 = 595;
const PAGE_HEIGHT: u32 = 842;
const MARGIN: u32 = 50;
const FONT_SIZE: u32 = 11;
const LEADING: u32 = 14;
const LINES_PER_PAGE: usize = ((PAGE_HEIGHT - 2 * MARGIN) / LEADING) as usize;

/// `GET /cv/{id}/pdf/` — the CV as a downloadable PDF.
pub async fn pdf_page<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<i64>,
) -> Result<Response, WebError>
where
  S: CvStore + Clone + 'static,
{
  let cv = state
    .store
    .get_cv(id)
    .await
    .map_err(WebError::from_store)?
    .ok_or(WebError::NotFound)?;

  let bytes = render_cv_pdf(&state.templates, &cv)?;
  let filename = format!("CV_{}_{}.pdf", cv.first_name, cv.last_name);

  Ok(
    (
      [
        (header::CONTENT_TYPE, "application/pdf".to_string()),
        (
          header::CONTENT_DISPOSITION,
          format!("attachment; filename=\"{filename}\""),
        ),
      ],
      bytes,
    )
      .into_response(),
  )
}

/// Render `cv` through the text detail template and wrap the result in PDF
/// bytes. Shared by the download handler and the mail worker.
pub fn render_cv_pdf(
  templates: &Templates,
  cv: &CurriculumVitae,
) -> Result<Vec<u8>, WebError> {
  let text = templates
    .render("detail_text", context! { bio => cv.bio.clone(), cv })
    .map_err(|e| WebError::Pdf(e.to_string()))?;
  Ok(text_to_pdf(&text))
}

/// Lay `text` out as a PDF document, one line per text row.
pub fn text_to_pdf(text: &str) -> Vec<u8> {
  let all_lines: Vec<String> = text.lines().map(escape).collect();
  let mut pages: Vec<&[String]> = all_lines.chunks(LINES_PER_PAGE).collect();
  if pages.is_empty() {
    pages.push(&[]);
  }

  // Object layout: 1 catalog, 2 page tree, 3 font, then an alternating
  // page/content pair per page.
  let mut buf: Vec<u8> = Vec::new();
  let mut offsets: Vec<usize> = Vec::new();

  buf.extend_from_slice(b"%PDF-1.4\n");

  push_obj(
    &mut buf,
    &mut offsets,
    "1 0 obj\n<< /Type /Catalog /Pages 2 0 R >>\nendobj\n".to_string(),
  );

  let kids = (0..pages.len())
    .map(|i| format!("{} 0 R", 4 + 2 * i))
    .collect::<Vec<_>>()
    .join(" ");
  push_obj(
    &mut buf,
    &mut offsets,
    format!(
      "2 0 obj\n<< /Type /Pages /Kids [{kids}] /Count {} >>\nendobj\n",
      pages.len()
    ),
  );

  push_obj(
    &mut buf,
    &mut offsets,
    "3 0 obj\n<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>\nendobj\n"
      .to_string(),
  );

  for (i, lines) in pages.iter().enumerate() {
    let page_id = 4 + 2 * i;
    let content_id = 5 + 2 * i;

    let mut stream = String::new();
    stream.push_str("BT\n");
    stream.push_str(&format!("/F1 {FONT_SIZE} Tf\n{LEADING} TL\n"));
    stream.push_str(&format!(
      "1 0 0 1 {} {} Tm\n",
      MARGIN,
      PAGE_HEIGHT - MARGIN
    ));
    for line in lines.iter() {
      stream.push_str(&format!("({line}) Tj T*\n"));
    }
    stream.push_str("ET\n");

    push_obj(
      &mut buf,
      &mut offsets,
      format!(
        "{page_id} 0 obj\n<< /Type /Page /Parent 2 0 R \
         /MediaBox [0 0 {PAGE_WIDTH} {PAGE_HEIGHT}] \
         /Resources << /Font << /F1 3 0 R >> >> \
         /Contents {content_id} 0 R >>\nendobj\n"
      ),
    );
    push_obj(
      &mut buf,
      &mut offsets,
      format!(
        "{content_id} 0 obj\n<< /Length {} >>\nstream\n{stream}endstream\nendobj\n",
        stream.len()
      ),
    );
  }

  let xref_offset = buf.len();
  let total = offsets.len() + 1;
  let mut xref = format!("xref\n0 {total}\n0000000000 65535 f \n");
  for off in &offsets {
    xref.push_str(&format!("{off:010} 00000 n \n"));
  }
  buf.extend_from_slice(xref.as_bytes());
  buf.extend_from_slice(
    format!(
      "trailer\n<< /Size {total} /Root 1 0 R >>\nstartxref\n{xref_offset}\n%%EOF\n"
    )
    .as_bytes(),
  );

  buf
}

fn push_obj(buf: &mut Vec<u8>, offsets: &mut Vec<usize>, body: String) {
  offsets.push(buf.len());
  buf.extend_from_slice(body.as_bytes());
}

/// Escape the characters PDF string literals reserve.
fn escape(line: &str) -> String {
  let mut out = String::with_capacity(line.len());
  for c in line.chars() {
    match c {
      '(' => out.push_str("\\("),
      ')' => out.push_str("\\)"),
      '\\' => out.push_str("\\\\"),
      c => out.push(c),
    }
  }
  out
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn pdf_has_magic_header_and_eof() {
    let pdf = text_to_pdf("Hello world");
    assert!(pdf.starts_with(b"%PDF-1.4"));
    assert!(pdf.ends_with(b"%%EOF\n"));
  }

  #[test]
  fn parens_are_escaped_in_text() {
    let pdf = text_to_pdf("call me (maybe)");
    let s = String::from_utf8_lossy(&pdf);
    assert!(s.contains("(call me \\(maybe\\)) Tj"), "{s}");
  }

  #[test]
  fn long_text_spills_onto_more_pages() {
    let text = (0..200)
      .map(|i| format!("line {i}"))
      .collect::<Vec<_>>()
      .join("\n");
    let pdf = text_to_pdf(&text);
    let s = String::from_utf8_lossy(&pdf);
    // 200 lines at 53 per page.
    assert!(s.contains("/Count 4"), "{s}");
  }

  #[test]
  fn empty_text_still_yields_one_page() {
    let pdf = text_to_pdf("");
    let s = String::from_utf8_lossy(&pdf);
    assert!(s.contains("/Count 1"), "{s}");
  }
}

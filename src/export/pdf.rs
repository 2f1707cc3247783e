use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

use crate::data::model::{FilteredView, Observation, COLUMNS};

use super::ExportError;

// ---------------------------------------------------------------------------
// Page geometry (points, A4 portrait)
// ---------------------------------------------------------------------------

const PAGE_WIDTH: f32 = 595.0;
const PAGE_HEIGHT: f32 = 842.0;
const MARGIN: f32 = 40.0;

const HEADER_HEIGHT: f32 = 22.0;
const ROW_HEIGHT: f32 = 20.0;
const CELL_PADDING: f32 = 4.0;
const FONT_SIZE: f32 = 9.0;

/// Column widths in canonical column order; must sum to the table width.
const COLUMN_WIDTHS: [f32; 5] = [90.0, 95.0, 140.0, 80.0, 110.0];

/// Header row background fill (light blue-grey).
const HEADER_FILL: [f32; 3] = [0.88, 0.91, 0.96];

// ---------------------------------------------------------------------------
// PDF encoder
// ---------------------------------------------------------------------------

/// Encode a view as a single-flow PDF table.
///
/// One header row (background fill, bold text) followed by one row per
/// observation, every cell framed by a uniform grid border. Rows that do
/// not fit one page continue on the next; the header is not repeated.
/// Output is byte-identical for identical input: object numbering is
/// sequential and no timestamps or ids are embedded.
pub fn to_pdf(view: &FilteredView<'_>) -> Result<Vec<u8>, ExportError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let regular_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let bold_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => regular_id,
            "F2" => bold_id,
        },
    });

    let mut kids: Vec<Object> = Vec::new();
    for operations in paginate(view) {
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let page_count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count,
            "Resources" => resources_id,
            "MediaBox" => vec![
                0.into(),
                0.into(),
                PAGE_WIDTH.into(),
                PAGE_HEIGHT.into(),
            ],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).map_err(lopdf::Error::from)?;
    Ok(buffer)
}

/// Lay the table out into per-page content operations. The first page
/// carries the header row; each page takes as many body rows as fit
/// between the margins.
fn paginate(view: &FilteredView<'_>) -> Vec<Vec<Operation>> {
    let mut pages = Vec::new();
    let mut ops = Vec::new();
    let mut y = PAGE_HEIGHT - MARGIN - HEADER_HEIGHT;

    header_row(&mut ops, y);

    for obs in view.rows() {
        if y - ROW_HEIGHT < MARGIN {
            pages.push(std::mem::take(&mut ops));
            y = PAGE_HEIGHT - MARGIN;
        }
        y -= ROW_HEIGHT;
        body_row(&mut ops, y, obs);
    }
    pages.push(ops);
    pages
}

fn header_row(ops: &mut Vec<Operation>, y: f32) {
    let [r, g, b] = HEADER_FILL;
    ops.push(Operation::new("rg", vec![r.into(), g.into(), b.into()]));
    ops.push(Operation::new(
        "re",
        vec![
            MARGIN.into(),
            y.into(),
            table_width().into(),
            HEADER_HEIGHT.into(),
        ],
    ));
    ops.push(Operation::new("f", vec![]));
    // back to black for text
    ops.push(Operation::new(
        "rg",
        vec![0.0f32.into(), 0.0f32.into(), 0.0f32.into()],
    ));

    let labels: Vec<String> = COLUMNS.iter().map(|c| c.to_string()).collect();
    row_cells(ops, y, HEADER_HEIGHT, &labels, "F2");
}

fn body_row(ops: &mut Vec<Operation>, y: f32, obs: &Observation) {
    row_cells(ops, y, ROW_HEIGHT, &obs.display_cells(), "F1");
}

/// Stroke the cell borders of one row and set its texts.
fn row_cells(ops: &mut Vec<Operation>, y: f32, height: f32, cells: &[String], font: &str) {
    ops.push(Operation::new(
        "RG",
        vec![0.45f32.into(), 0.45f32.into(), 0.45f32.into()],
    ));
    ops.push(Operation::new("w", vec![0.5f32.into()]));

    let mut x = MARGIN;
    for (text, width) in cells.iter().zip(COLUMN_WIDTHS) {
        ops.push(Operation::new(
            "re",
            vec![x.into(), y.into(), width.into(), height.into()],
        ));
        ops.push(Operation::new("S", vec![]));

        ops.push(Operation::new("BT", vec![]));
        ops.push(Operation::new("Tf", vec![font.into(), FONT_SIZE.into()]));
        ops.push(Operation::new(
            "Td",
            vec![(x + CELL_PADDING).into(), (y + height / 2.0 - 3.0).into()],
        ));
        ops.push(Operation::new("Tj", vec![Object::string_literal(text.as_str())]));
        ops.push(Operation::new("ET", vec![]));

        x += width;
    }
}

fn table_width() -> f32 {
    COLUMN_WIDTHS.iter().sum()
}

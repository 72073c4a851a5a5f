use adf_babel::format::Format;
use adf_babel::formats::markdown::MarkdownFormat;
use adf_babel::model::{
    BlockNode, Document, InlineNode, Paragraph, Table, TableCell, TableRow,
};

fn roundtrip(md: &str) -> String {
    let doc = MarkdownFormat.parse(md).expect("Failed to parse markdown");
    MarkdownFormat
        .serialize(&doc)
        .expect("Failed to serialize markdown")
}

fn cell(text: &str, is_header: bool) -> TableCell {
    TableCell {
        is_header,
        blocks: vec![BlockNode::Paragraph(Paragraph::new(vec![InlineNode::text(
            text,
        )]))],
    }
}

#[test]
fn test_table_round_trip() {
    let md = "| A | B |\n|---|---|\n| 1 | 2 |";
    assert_eq!(roundtrip(md), "| A | B |\n| --- | --- |\n| 1 | 2 |");
}

#[test]
fn test_first_row_is_header() {
    let doc = MarkdownFormat
        .parse("| Left | Right |\n| :--- | ---: |\n| L | R |")
        .unwrap();
    match &doc.blocks[0] {
        BlockNode::Table(table) => {
            assert_eq!(table.rows.len(), 2);
            assert!(table.rows[0].cells.iter().all(|c| c.is_header));
            assert!(table.rows[1].cells.iter().all(|c| !c.is_header));
        }
        other => panic!("Expected table, got {other:?}"),
    }
}

#[test]
fn test_short_rows_are_padded() {
    assert_eq!(
        roundtrip("| a | b | c |\n| --- | --- | --- |\n| 1 |"),
        "| a | b | c |\n| --- | --- | --- |\n| 1 |  |  |"
    );
}

#[test]
fn test_escaped_pipes_stay_in_cell() {
    let doc = MarkdownFormat.parse("| a \\| b | c |").unwrap();
    match &doc.blocks[0] {
        BlockNode::Table(table) => {
            assert_eq!(table.rows[0].cells.len(), 2);
            assert_eq!(table.rows[0].cells[0], cell("a | b", true));
        }
        other => panic!("Expected table, got {other:?}"),
    }
    assert_eq!(
        roundtrip("| a \\| b | c |"),
        "| a \\| b | c |\n| --- | --- |"
    );
}

#[test]
fn test_separator_follows_marked_header_row() {
    let table = Table {
        rows: vec![
            TableRow {
                cells: vec![cell("caption", false)],
            },
            TableRow {
                cells: vec![cell("H", true)],
            },
            TableRow {
                cells: vec![cell("v", false)],
            },
        ],
    };
    let output = MarkdownFormat
        .serialize(&Document::new(vec![BlockNode::Table(table)]))
        .unwrap();
    assert_eq!(output, "| caption |\n| H |\n| --- |\n| v |");
}

#[test]
fn test_separator_after_first_row_without_headers() {
    let table = Table {
        rows: vec![
            TableRow {
                cells: vec![cell("a", false), cell("b", false)],
            },
            TableRow {
                cells: vec![cell("c", false), cell("d", false)],
            },
        ],
    };
    let output = MarkdownFormat
        .serialize(&Document::new(vec![BlockNode::Table(table)]))
        .unwrap();
    assert_eq!(output, "| a | b |\n| --- | --- |\n| c | d |");
}

#[test]
fn test_table_without_cells_is_dropped() {
    let table = Table {
        rows: vec![TableRow { cells: vec![] }],
    };
    let doc = Document::new(vec![
        BlockNode::Paragraph(Paragraph::new(vec![InlineNode::text("before")])),
        BlockNode::Table(table),
    ]);
    let output = MarkdownFormat.serialize(&doc).unwrap();
    assert_eq!(output, "before");
    assert_eq!(roundtrip(&output), "before");
}

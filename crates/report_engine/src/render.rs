use std::io;
use std::string::FromUtf8Error;

use thiserror::Error;

use report_core::TitleRow;

/// Column order of the rendered CSV.
pub const CSV_HEADERS: [&str; 5] = [
    "Title",
    "HowToObtain",
    "HowToObtainLinks",
    "TitleNPC",
    "EnemyTag",
];

/// Separator between URLs in the CSV links column.
pub const LINK_SEPARATOR: &str = " | ";

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("csv output was not utf-8: {0}")]
    Utf8(#[from] FromUtf8Error),
}

/// Render the filtered rows as UTF-8 CSV with minimal quoting.
pub fn render_csv(rows: &[TitleRow]) -> Result<String, RenderError> {
    let mut buf = Vec::new();
    {
        let mut writer = csv::Writer::from_writer(&mut buf);
        writer.write_record(CSV_HEADERS)?;
        for row in rows {
            let links = row.how_links.join(LINK_SEPARATOR);
            writer.write_record([
                row.title.as_str(),
                row.how_to_obtain.as_str(),
                links.as_str(),
                row.npc.as_str(),
                row.enemy_tag.as_str(),
            ])?;
        }
        writer.flush()?;
    }
    Ok(String::from_utf8(buf)?)
}

/// Render the filtered rows as a self-contained sortable page.
///
/// Title, NPC and tag cells are escaped; the obtain cell is the already
/// restricted markup and goes in raw so its links stay clickable.
pub fn render_html(rows: &[TitleRow]) -> String {
    let mut page = String::with_capacity(PAGE_HEAD.len() + PAGE_TAIL.len() + rows.len() * 160);
    page.push_str(PAGE_HEAD);
    for row in rows {
        page.push_str("<tr>");
        page.push_str(&format!("<td>{}</td>", escape_html(&row.title)));
        page.push_str(&format!("<td>{}</td>", row.how_markup));
        page.push_str(&format!("<td>{}</td>", escape_html(&row.npc)));
        page.push_str(&format!("<td>{}</td>", escape_html(row.enemy_tag.as_str())));
        page.push_str("</tr>\n");
    }
    page.push_str(PAGE_TAIL);
    page
}

fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

const PAGE_HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<title>FFXI Titles (Filtered)</title>
<style>
table { border-collapse: collapse; width: 100%; font-family: Arial, sans-serif; }
th, td { border: 1px solid #aaa; padding: 6px 10px; vertical-align: top; }
th { cursor: pointer; background: #f0f0f0; user-select: none; }
th:hover { background: #e0e0e0; }
#rowCount { margin-bottom: 8px; font-weight: bold; }
</style>
</head>
<body>

<div id="rowCount">Rows: 0</div>

<table id="titlesTable">
  <thead>
    <tr>
      <th onclick="sortTable(0)">Title</th>
      <th onclick="sortTable(1)">How to Obtain</th>
      <th onclick="sortTable(2)">Title NPC</th>
      <th onclick="sortTable(3)">Enemy Tag</th>
    </tr>
  </thead>
  <tbody>
"#;

const PAGE_TAIL: &str = r#"  </tbody>
</table>

<script>
function updateRowCount() {
  const table = document.getElementById("titlesTable");
  const count = table.tBodies[0].rows.length;
  document.getElementById("rowCount").innerText = "Rows: " + count;
}

function sortTable(col) {
  const table = document.getElementById("titlesTable");
  let rows = Array.from(table.tBodies[0].rows);

  const asc =
    table.getAttribute("data-sort-col") != col ||
    table.getAttribute("data-sort-dir") !== "asc";

  table.setAttribute("data-sort-col", col);
  table.setAttribute("data-sort-dir", asc ? "asc" : "desc");

  rows.sort((a, b) => {
    const x = a.cells[col].innerText.toLowerCase();
    const y = b.cells[col].innerText.toLowerCase();
    return asc ? x.localeCompare(y) : y.localeCompare(x);
  });

  rows.forEach(r => table.tBodies[0].appendChild(r));
  updateRowCount();
}

updateRowCount();
</script>

</body>
</html>
"#;

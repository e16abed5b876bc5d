//! Server-rendered HTML pages. Every dynamic string passes through [`escape`].

use serde_json::Value;

use crate::database::guard::validate_table_name;
use crate::database::ResultSet;
use crate::types::Flash;

pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, user: Option<&str>, flashes: &[Flash], body: &str) -> String {
    let nav = match user {
        Some(user) => format!(
            r#"<nav><span>Signed in as <strong>{}</strong></span> <a href="/tables">Tables</a> <a href="/logout">Log out</a></nav>"#,
            escape(user)
        ),
        None => String::new(),
    };

    let messages = flashes
        .iter()
        .map(|f| format!(r#"<div class="alert alert-{}">{}</div>"#, f.level.as_str(), escape(&f.message)))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
<style>
body {{ font-family: sans-serif; margin: 2rem; }}
table {{ border-collapse: collapse; }}
th, td {{ border: 1px solid #ccc; padding: .25rem .5rem; text-align: left; }}
.alert {{ padding: .5rem; margin-bottom: .5rem; border-radius: 4px; }}
.alert-success {{ background: #d1e7dd; }}
.alert-warning {{ background: #fff3cd; }}
.alert-danger {{ background: #f8d7da; }}
.alert-info {{ background: #cff4fc; }}
.null {{ color: #999; font-style: italic; }}
</style>
</head>
<body>
{nav}
{messages}
{body}
</body>
</html>
"#,
        title = escape(title),
    )
}

fn search_form(action: &str, search: &str, placeholder: &str) -> String {
    format!(
        r#"<form method="get" action="{}"><input type="text" name="search" value="{}" placeholder="{}"> <button type="submit">Search</button></form>"#,
        escape(action),
        escape(search),
        escape(placeholder)
    )
}

pub fn login_page(flashes: &[Flash]) -> String {
    let body = r#"<h1>Database console</h1>
<form method="post" action="/login">
<p><label>Username <input type="text" name="username" autocomplete="username" required></label></p>
<p><label>Password <input type="password" name="password" autocomplete="current-password"></label></p>
<p><button type="submit">Log in</button></p>
</form>"#;
    layout("Log in", None, flashes, body)
}

pub fn tables_page(user: &str, schema: &str, tables: &[String], search: &str, flashes: &[Flash]) -> String {
    let items = if tables.is_empty() {
        "<p>No tables found.</p>".to_string()
    } else {
        let lis = tables
            .iter()
            .map(|name| {
                // Names that could never pass validation are listed but not linked.
                if validate_table_name(name) {
                    format!(r#"<li><a href="/table/{0}">{0}</a></li>"#, escape(name))
                } else {
                    format!("<li>{}</li>", escape(name))
                }
            })
            .collect::<Vec<_>>()
            .join("\n");
        format!("<ul>\n{}\n</ul>", lis)
    };

    let body = format!(
        "<h1>Tables in {}</h1>\n{}\n{}",
        escape(schema),
        search_form("/tables", search, "Filter by name"),
        items
    );
    layout("Tables", Some(user), flashes, &body)
}

fn render_cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => r#"<span class="null">NULL</span>"#.to_string(),
        Some(Value::String(s)) => escape(s),
        Some(other) => escape(&other.to_string()),
    }
}

pub fn table_page(user: &str, table: &str, result: &ResultSet, search: &str, flashes: &[Flash]) -> String {
    let content = if result.columns.is_empty() {
        "<p>No data to show.</p>".to_string()
    } else {
        let header = result
            .columns
            .iter()
            .map(|c| format!("<th>{}</th>", escape(c)))
            .collect::<String>();
        let rows = result
            .rows
            .iter()
            .map(|row| {
                let cells = result
                    .columns
                    .iter()
                    .map(|c| format!("<td>{}</td>", render_cell(row.get(c))))
                    .collect::<String>();
                format!("<tr>{}</tr>", cells)
            })
            .collect::<Vec<_>>()
            .join("\n");
        format!(
            "<p>{} row(s)</p>\n<table>\n<thead><tr>{}</tr></thead>\n<tbody>\n{}\n</tbody>\n</table>",
            result.rows.len(),
            header,
            rows
        )
    };

    let body = format!(
        "<h1>{}</h1>\n{}\n{}",
        escape(table),
        search_form(&format!("/table/{}", table), search, "Search in every column"),
        content
    );
    layout(table, Some(user), flashes, &body)
}

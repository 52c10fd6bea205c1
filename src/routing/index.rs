//! Index page rendering.
//!
//! # Responsibilities
//! - Render the HTML page listing every binding, once at startup
//! - Escape command strings so they can't break the page structure
//!
//! # Design Decisions
//! - Rendered eagerly and cached; request handlers serve the string verbatim
//! - Declaration order preserved in the listing

/// Escape the five HTML-significant characters.
pub fn html_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render the index page for the given (path, command) bindings.
pub fn render_index(routes: &[(String, String)], add_exit: bool) -> String {
    let mut items = String::new();
    for (path, command) in routes {
        items.push_str(&format!(
            "\t\t<li><a href=\"{path}\">{path}</a> <span style=\"color: #888\">- {command}</span></li>\n",
            path = html_escape(path),
            command = html_escape(command),
        ));
    }
    if add_exit {
        items.push_str("\t\t<li><a href=\"/exit\">/exit</a></li>\n");
    }

    format!(
        "<!DOCTYPE html>\n\
         <html>\n\
         <head>\n\
         \t<title>cmdserve</title>\n\
         </head>\n\
         <body>\n\
         \t<h1>cmdserve</h1>\n\
         \t<ul>\n\
         {items}\
         \t</ul>\n\
         </body>\n\
         </html>\n"
    )
}

//! Server-rendered HTML.
//!
//! Views are plain functions from data to `String`; every interpolated value
//! goes through [`escape`].

pub mod admin;
pub mod public;

use tcu_types::models::AuthInfo;

use crate::session::Flash;
use crate::validation::FieldErrors;

pub fn escape(s: &str) -> String {
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

/// Top-level sections of the public site, for nav highlighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Home,
    About,
    Products,
    Solutions,
    Blogs,
    Testimonials,
    Contact,
}

const NAV: &[(Section, &str, &str)] = &[
    (Section::Home, "/", "Home"),
    (Section::About, "/aboutus", "About Us"),
    (Section::Products, "/products", "Products"),
    (Section::Solutions, "/solutions", "Solutions"),
    (Section::Blogs, "/blogs", "Blogs"),
    (Section::Testimonials, "/testimonials", "Testimonials"),
    (Section::Contact, "/contactus", "Contact Us"),
];

fn head(title: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{} | TCU</title>\n<link rel=\"stylesheet\" href=\"/assets/site.css\">\n</head>\n",
        escape(title)
    )
}

pub(crate) fn flash_list(flash: &[Flash]) -> String {
    if flash.is_empty() {
        return String::new();
    }
    let mut out = String::from("<div class=\"toasts\" role=\"status\">\n");
    for f in flash {
        out.push_str(&format!(
            "<div class=\"{}\">{}</div>\n",
            f.kind.css_class(),
            escape(&f.text)
        ));
    }
    out.push_str("</div>\n");
    out
}

fn nav(current: Option<Section>) -> String {
    let mut out = String::from(
        "<nav class=\"navbar\">\n<a class=\"brand\" href=\"/\"><img src=\"/assets/logo.png\" alt=\"TCU\"></a>\n<ul>\n",
    );
    for (section, href, label) in NAV {
        let active = if current == Some(*section) { " class=\"active\" aria-current=\"page\"" } else { "" };
        out.push_str(&format!("<li><a href=\"{}\"{}>{}</a></li>\n", href, active, label));
    }
    out.push_str("</ul>\n</nav>\n");
    out
}

fn footer() -> String {
    let mut out = String::from("<footer class=\"footer\">\n<div class=\"footer-links\">\n");
    for (_, href, label) in NAV {
        out.push_str(&format!("<a href=\"{}\">{}</a>\n", href, label));
    }
    out.push_str(
        "</div>\n<p>Yangon, Myanmar</p>\n<p>&copy; TCU. All rights reserved.</p>\n</footer>\n",
    );
    out
}

/// Public site layout: nav bar, notifications, body, footer.
pub fn page(title: &str, section: Option<Section>, flash: &[Flash], body: &str) -> String {
    format!(
        "{}<body>\n{}{}<main>\n{}</main>\n{}</body>\n</html>\n",
        head(title),
        nav(section),
        flash_list(flash),
        body,
        footer()
    )
}

/// Admin layout. The header shows the user's initial and a logout button
/// when logged in.
pub fn admin_page(title: &str, auth: Option<&AuthInfo>, flash: &[Flash], body: &str) -> String {
    let header = match auth {
        Some(auth) => format!(
            "<header class=\"admin-header\">\n<a href=\"/admin\">TCU Admin</a>\n\
             <a class=\"avatar\" href=\"/admin/profile\" title=\"{}\">{}</a>\n\
             <form method=\"post\" action=\"/admin/logout\"><button type=\"submit\">Log out</button></form>\n\
             </header>\n",
            escape(&auth.user.name),
            escape(&auth.user.initial())
        ),
        None => String::from("<header class=\"admin-header\">\n<span>TCU Admin</span>\n</header>\n"),
    };
    format!(
        "{}<body class=\"admin\">\n{}{}<main>\n{}</main>\n</body>\n</html>\n",
        head(title),
        header,
        flash_list(flash),
        body
    )
}

pub fn not_found(flash: &[Flash]) -> String {
    page(
        "Page not found",
        None,
        flash,
        "<section class=\"not-found\">\n<h1>404</h1>\n<p>The page you are looking for does not exist.</p>\n\
         <a href=\"/\">Back to home</a>\n</section>\n",
    )
}

// -- Form helpers --

pub(crate) fn field_error(errors: &FieldErrors, field: &str) -> String {
    match errors.get(field) {
        Some(message) => format!("<p class=\"field-error\">{}</p>\n", escape(message)),
        None => String::new(),
    }
}

pub(crate) fn input(
    kind: &str,
    name: &str,
    label: &str,
    value: &str,
    errors: &FieldErrors,
) -> String {
    format!(
        "<label>{label}\n<input type=\"{kind}\" name=\"{name}\" value=\"{value}\">\n</label>\n{error}",
        label = escape(label),
        kind = kind,
        name = name,
        value = escape(value),
        error = field_error(errors, name),
    )
}

pub(crate) fn select(
    name: &str,
    label: &str,
    options: &[(&str, &str)],
    selected: &str,
    errors: &FieldErrors,
) -> String {
    let mut out = format!("<label>{}\n<select name=\"{}\">\n", escape(label), name);
    for (value, text) in options {
        let mark = if *value == selected { " selected" } else { "" };
        out.push_str(&format!(
            "<option value=\"{}\"{}>{}</option>\n",
            escape(value),
            mark,
            escape(text)
        ));
    }
    out.push_str("</select>\n</label>\n");
    out.push_str(&field_error(errors, name));
    out
}

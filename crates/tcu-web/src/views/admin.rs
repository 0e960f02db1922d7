use url::form_urlencoded;

use tcu_types::models::{AuthInfo, MessageInfo, Role, User};

use crate::dates::{format_date, format_joined_date};
use crate::listing::{MessageSort, Page, UserSort};
use crate::session::Flash;
use crate::validation::{FieldErrors, UserForm};

use super::{admin_page, escape, field_error, input, select};

/// Link to a list screen keeping search and sort.
fn list_href(base: &str, q: &str, sort: &str, page: usize) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());
    if !q.is_empty() {
        query.append_pair("q", q);
    }
    query.append_pair("sort", sort);
    query.append_pair("page", &page.to_string());
    format!("{}?{}", base, query.finish())
}

fn search_bar(base: &str, q: &str, sorts: &[(&str, &str)], current: &str) -> String {
    let mut out = format!(
        "<form method=\"get\" action=\"{base}\" class=\"search\">\n\
         <input type=\"search\" name=\"q\" value=\"{q}\" placeholder=\"Search\">\n\
         <input type=\"hidden\" name=\"page\" value=\"1\">\n<select name=\"sort\">\n",
        base = base,
        q = escape(q),
    );
    for (key, label) in sorts {
        let mark = if *key == current { " selected" } else { "" };
        out.push_str(&format!("<option value=\"{}\"{}>{}</option>\n", key, mark, escape(label)));
    }
    out.push_str("</select>\n<button type=\"submit\">Search</button>\n</form>\n");
    out
}

fn pager<T>(base: &str, q: &str, sort: &str, page: &Page<T>) -> String {
    let mut out = String::from("<nav class=\"pager\">\n");
    if let Some(summary) = page.summary() {
        out.push_str(&format!("<span class=\"summary\">{}</span>\n", summary));
    }
    if page.has_prev() {
        out.push_str(&format!(
            "<a href=\"{}\" rel=\"prev\">Previous</a>\n",
            escape(&list_href(base, q, sort, page.page - 1))
        ));
    }
    for n in page.window() {
        if n == page.page {
            out.push_str(&format!("<span class=\"current\" aria-current=\"page\">{}</span>\n", n));
        } else {
            out.push_str(&format!("<a href=\"{}\">{}</a>\n", escape(&list_href(base, q, sort, n)), n));
        }
    }
    if page.has_next() {
        out.push_str(&format!(
            "<a href=\"{}\" rel=\"next\">Next</a>\n",
            escape(&list_href(base, q, sort, page.page + 1))
        ));
    }
    out.push_str("</nav>\n");
    out
}

fn role_badge(role: Role) -> String {
    let class = match role {
        Role::Admin => "badge badge-admin",
        Role::Staff => "badge badge-staff",
        Role::Unknown => "badge",
    };
    format!("<span class=\"{}\">{}</span>", class, role.label())
}

// -- Auth --

pub fn login(email: &str, errors: &FieldErrors, failure: Option<&str>, flash: &[Flash]) -> String {
    let mut body = String::from(
        "<section class=\"login\">\n<h1>Sign in</h1>\n<form method=\"post\" action=\"/admin/login\">\n",
    );
    if let Some(failure) = failure {
        body.push_str(&format!("<p class=\"form-error\">{}</p>\n", escape(failure)));
    }
    body.push_str(&input("email", "email", "Email", email, errors));
    body.push_str(&input("password", "password", "Password", "", errors));
    body.push_str("<button type=\"submit\">Login</button>\n</form>\n</section>\n");
    admin_page("Login", None, flash, &body)
}

pub fn welcome(auth: &AuthInfo, flash: &[Flash]) -> String {
    let users_card = if auth.user.is_admin() {
        String::from("<a class=\"menu-card\" href=\"/admin/users\"><h2>Users</h2><p>Manage staff accounts</p></a>\n")
    } else {
        String::from(
            "<div class=\"menu-card disabled\" aria-disabled=\"true\"><h2>Users</h2><p>Admins only</p></div>\n",
        )
    };
    let body = format!(
        "<section class=\"welcome\">\n<h1>Welcome, {name}</h1>\n<div class=\"menu\">\n\
         <a class=\"menu-card\" href=\"/admin/queries\"><h2>Customer Queries</h2><p>Review and reply to inquiries</p></a>\n\
         {users}<a class=\"menu-card\" href=\"/admin/profile\"><h2>Profile</h2><p>Your account</p></a>\n\
         </div>\n</section>\n",
        name = escape(&auth.user.name),
        users = users_card,
    );
    admin_page("Welcome", Some(auth), flash, &body)
}

pub fn profile(auth: &AuthInfo, flash: &[Flash]) -> String {
    let user = &auth.user;
    let body = format!(
        "<section class=\"profile\">\n<div class=\"avatar large\">{initial}</div>\n<h1>{name}</h1>\n\
         <p>{email}</p>\n<p>{badge}</p>\n<p>Joined {joined}</p>\n</section>\n",
        initial = escape(&user.initial()),
        name = escape(&user.name),
        email = escape(&user.email),
        badge = role_badge(user.role()),
        joined = format_date(&user.created_at),
    );
    admin_page("Profile", Some(auth), flash, &body)
}

// -- Users --

/// Delete link leading to the confirmation page. Nothing for your own row,
/// a greyed-out label for admins.
fn delete_control(user: &User, auth: &AuthInfo, label: &str) -> String {
    if user.id == auth.user.id {
        String::new()
    } else if user.is_admin() {
        format!(
            "<span class=\"danger disabled\" aria-disabled=\"true\" title=\"Cannot delete admin user\">{}</span>",
            label
        )
    } else {
        format!("<a class=\"danger\" href=\"/admin/users/{}/delete\">{}</a>", escape(&user.id), label)
    }
}

pub fn users(page: &Page<User>, q: &str, sort: UserSort, auth: &AuthInfo, flash: &[Flash]) -> String {
    let sorts: Vec<(&str, &str)> = UserSort::ALL.iter().map(|s| (s.key(), s.label())).collect();
    let mut body = String::from("<section class=\"users\">\n<h1>Users</h1>\n");
    body.push_str(&search_bar("/admin/users", q, &sorts, sort.key()));
    body.push_str(
        "<table>\n<thead><tr><th>No.</th><th>Name</th><th>Email</th><th>Role</th><th>Joined</th><th></th></tr></thead>\n<tbody>\n",
    );
    if page.items.is_empty() {
        body.push_str("<tr><td colspan=\"6\" class=\"empty\">No users found</td></tr>\n");
    }
    for (i, user) in page.items.iter().enumerate() {
        let delete = delete_control(user, auth, "Delete");
        body.push_str(&format!(
            "<tr><td>{no}</td><td><a href=\"/admin/users/{id}\">{name}</a></td><td>{email}</td>\
             <td>{badge}</td><td>{joined}</td><td>{delete}</td></tr>\n",
            no = page.offset() + i + 1,
            id = escape(&user.id),
            name = escape(&user.name),
            email = escape(&user.email),
            badge = role_badge(user.role()),
            joined = format_date(&user.created_at),
            delete = delete,
        ));
    }
    body.push_str("</tbody>\n</table>\n");
    body.push_str(&pager("/admin/users", q, sort.key(), page));
    body.push_str("</section>\n");
    admin_page("Users", Some(auth), flash, &body)
}

pub fn user_details(
    user: &User,
    form: &UserForm,
    errors: &FieldErrors,
    auth: &AuthInfo,
    flash: &[Flash],
) -> String {
    let roles = [(Role::Admin.code(), Role::Admin.label()), (Role::Staff.code(), Role::Staff.label())];
    let mut body = format!(
        "<section class=\"user-details\">\n<a href=\"/admin/users\">&larr; Users</a>\n<h1>{name}</h1>\n\
         <p>Joined {joined}</p>\n<form method=\"post\" action=\"/admin/users/{id}\">\n",
        name = escape(&user.name),
        joined = format_date(&user.created_at),
        id = escape(&user.id),
    );
    body.push_str(&input("text", "name", "Name", &form.name, errors));
    body.push_str(&input("email", "email", "Email", &form.email, errors));
    body.push_str(&select("role", "Role", &roles, &form.role, errors));
    body.push_str("<button type=\"submit\">Save</button>\n</form>\n");
    let delete = delete_control(user, auth, "Delete user");
    if !delete.is_empty() {
        body.push_str(&format!("<p>{}</p>\n", delete));
    }
    body.push_str("</section>\n");
    admin_page(&user.name, Some(auth), flash, &body)
}

pub fn confirm_delete(user: &User, auth: &AuthInfo, flash: &[Flash]) -> String {
    let body = format!(
        "<section class=\"confirm-delete\">\n<h1>Delete User</h1>\n\
         <p>Are you sure you want to delete this user? All data will be permanently removed. \
         This action cannot be undone.</p>\n<p><strong>{name}</strong> ({email})</p>\n\
         <form method=\"post\" action=\"/admin/users/{id}/delete\">\n\
         <button type=\"submit\" class=\"danger\">Delete</button>\n\
         <a class=\"button\" href=\"/admin/users/{id}\">Cancel</a>\n</form>\n</section>\n",
        name = escape(&user.name),
        email = escape(&user.email),
        id = escape(&user.id),
    );
    admin_page("Delete User", Some(auth), flash, &body)
}

// -- Queries --

pub fn queries(
    page: &Page<MessageInfo>,
    q: &str,
    sort: MessageSort,
    auth: &AuthInfo,
    flash: &[Flash],
) -> String {
    let sorts: Vec<(&str, &str)> = MessageSort::ALL.iter().map(|s| (s.key(), s.label())).collect();
    let mut body = String::from(
        "<section class=\"queries\">\n<h1>Customer Queries</h1>\n\
         <a class=\"button\" href=\"/admin/queries/export\">Export to Excel</a>\n",
    );
    body.push_str(&search_bar("/admin/queries", q, &sorts, sort.key()));
    body.push_str(
        "<table>\n<thead><tr><th>No.</th><th>Name</th><th>Email</th><th>Company</th><th>Country</th>\
         <th>Sent At</th></tr></thead>\n<tbody>\n",
    );
    if page.items.is_empty() {
        body.push_str("<tr><td colspan=\"6\" class=\"empty\">No queries found</td></tr>\n");
    }
    for (i, m) in page.items.iter().enumerate() {
        let class = if m.read { "read" } else { "unread" };
        body.push_str(&format!(
            "<tr class=\"{class}\"><td>{no}</td><td><a href=\"/admin/queries/{id}\">{name}</a></td>\
             <td>{email}</td><td>{company}</td><td>{country}</td><td>{sent}</td></tr>\n",
            class = class,
            no = page.offset() + i + 1,
            id = escape(&m.id),
            name = escape(&m.full_name()),
            email = escape(&m.email),
            company = escape(&m.company_name),
            country = escape(&m.country),
            sent = escape(&format_joined_date(&m.created_at)),
        ));
    }
    body.push_str("</tbody>\n</table>\n");
    body.push_str(&pager("/admin/queries", q, sort.key(), page));
    body.push_str("</section>\n");
    admin_page("Customer Queries", Some(auth), flash, &body)
}

pub struct ReplyState<'a> {
    pub open: bool,
    pub text: &'a str,
    pub errors: &'a FieldErrors,
}

pub fn query_details(message: &MessageInfo, reply: ReplyState<'_>, auth: &AuthInfo, flash: &[Flash]) -> String {
    let id = escape(&message.id);
    let mut body = format!(
        "<section class=\"query-details\">\n<a href=\"/admin/queries\">&larr; Customer Queries</a>\n\
         <h1>{name}</h1>\n<dl>\n<dt>Email</dt><dd>{email}</dd>\n<dt>Phone</dt><dd>{phone}</dd>\n\
         <dt>Company</dt><dd>{company}</dd>\n<dt>Country</dt><dd>{country}</dd>\n\
         <dt>Job Title</dt><dd>{title}</dd>\n<dt>Sent At</dt><dd>{sent}</dd>\n</dl>\n\
         <h2>Job Details</h2>\n<p>{details}</p>\n",
        name = escape(&message.full_name()),
        email = escape(&message.email),
        phone = escape(&message.phone),
        company = escape(&message.company_name),
        country = escape(&message.country),
        title = escape(&message.job_title),
        sent = escape(&format_joined_date(&message.created_at)),
        details = escape(message.job_details.as_deref().unwrap_or("-")),
    );

    if message.read {
        body.push_str("<p class=\"status\">Read</p>\n");
    } else {
        body.push_str(&format!(
            "<form method=\"post\" action=\"/admin/queries/{id}/read\"><button type=\"submit\">Mark as read</button></form>\n"
        ));
    }

    if reply.open {
        body.push_str(&format!(
            "<form method=\"post\" action=\"/admin/queries/{id}/reply\" class=\"reply\">\n\
             <label>Reply\n<textarea name=\"replyText\" rows=\"6\">{text}</textarea>\n</label>\n{error}\
             <button type=\"submit\">Send reply</button>\n<a href=\"/admin/queries/{id}\">Cancel</a>\n</form>\n",
            text = escape(reply.text),
            error = field_error(reply.errors, "replyText"),
        ));
    } else {
        body.push_str(&format!("<a class=\"button\" href=\"/admin/queries/{id}?reply=1\">Reply</a>\n"));
    }
    body.push_str("</section>\n");
    admin_page("Query details", Some(auth), flash, &body)
}

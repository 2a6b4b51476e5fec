use crate::session::CurrentUser;

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!doctype html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title} | rendermark</title>\n</head>\n<body>\n{body}\n</body>\n</html>\n",
        title = escape_html(title),
    )
}

fn top_menu(user: &CurrentUser) -> String {
    match user.login() {
        Some(login) => format!(
            "<nav class=\"top-menu\"><a class=\"action-account\" href=\"/my/account\">{}</a>\
             <form method=\"post\" action=\"/logout\"><button class=\"action-logout\">Sign out</button></form></nav>",
            escape_html(login)
        ),
        None => "<nav class=\"top-menu\"><a class=\"action-login\" href=\"/login\">Sign in</a></nav>"
            .to_string(),
    }
}

pub(crate) fn landing_page(user: &CurrentUser) -> String {
    let greeting = match user.login() {
        Some(login) => format!("<p class=\"welcome\">Welcome back, {}.</p>", escape_html(login)),
        None => "<p class=\"welcome\">Sign in to continue.</p>".to_string(),
    };
    layout("Home", &format!("{}\n<main>{greeting}</main>", top_menu(user)))
}

pub(crate) fn login_page(error: Option<&str>) -> String {
    let flash = error
        .map(|message| format!("<div class=\"flash error\">{}</div>", escape_html(message)))
        .unwrap_or_default();
    layout(
        "Sign in",
        &format!(
            "<main>{flash}<form class=\"login-form\" method=\"post\" action=\"/login\">\
             <label>Username <input name=\"login\" type=\"text\"></label>\
             <label>Password <input name=\"password\" type=\"password\"></label>\
             <button type=\"submit\">Sign in</button></form></main>"
        ),
    )
}

pub(crate) fn account_page(user: &CurrentUser, login: &str) -> String {
    layout(
        "My account",
        &format!(
            "{}\n<main><div class=\"form--field-container\">{}</div></main>",
            top_menu(user),
            escape_html(login)
        ),
    )
}

pub(crate) fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

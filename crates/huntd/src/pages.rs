//! HTML pages served by the daemon
//!
//! Pages are small enough that they are rendered as plain strings; user
//! supplied values are escaped before interpolation.

/// Escape a value for interpolation into HTML text or attribute content
fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Shared page shell
fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{title}</title>\n\
         <style>\n\
         body {{ font-family: sans-serif; max-width: 40rem; margin: 3rem auto; padding: 0 1rem; }}\n\
         select, button {{ font-size: 1rem; padding: 0.4rem; }}\n\
         </style>\n\
         </head>\n\
         <body>\n{body}\n</body>\n\
         </html>\n",
        title = escape_html(title),
        body = body,
    )
}

/// Landing page
pub fn home() -> String {
    page(
        "Scavenger Hunt",
        "<h1>Scavenger Hunt</h1>\n\
         <p>Scan the code at a challenge station to find your team's next stop.</p>",
    )
}

/// Team-selection form shown after completing a challenge
pub fn team_form(challenge_id: &str, teams: &[String]) -> String {
    let id = escape_html(challenge_id);

    let mut options = String::new();
    for team in teams {
        let name = escape_html(team);
        options.push_str(&format!("<option value=\"{name}\">{name}</option>\n"));
    }

    let body = format!(
        "<h1>Challenge complete!</h1>\n\
         <p>Select your team to get the next challenge.</p>\n\
         <form method=\"post\" action=\"/next/{id}\">\n\
         <select name=\"team\" required>\n\
         <option value=\"\" disabled selected>Your team</option>\n\
         {options}\
         </select>\n\
         <button type=\"submit\">Next challenge</button>\n\
         </form>",
    );

    page("Select your team", &body)
}

/// Redirect page pointing at the next challenge
pub fn redirect(team: &str, url: &str) -> String {
    let team = escape_html(team);
    let url = escape_html(url);

    let body = format!(
        "<h1>On you go, {team}!</h1>\n\
         <p>Your next challenge is ready.</p>\n\
         <p><a href=\"{url}\">Open the next challenge</a></p>\n\
         <meta http-equiv=\"refresh\" content=\"3;url={url}\">",
    );

    page("Next challenge", &body)
}

/// Terminal page when the sequence is exhausted
pub fn finished(team: &str) -> String {
    let team = escape_html(team);

    let body = format!(
        "<h1>Congratulations, {team}!</h1>\n\
         <p>You have completed every challenge. Head back to the start.</p>",
    );

    page("Finished", &body)
}

/// Generic failure page
pub fn error_page(message: &str) -> String {
    let message = escape_html(message);

    let body = format!(
        "<h1>Something went wrong</h1>\n\
         <p>{message}</p>\n\
         <p><a href=\"/\">Back to start</a></p>",
    );

    page("Error", &body)
}

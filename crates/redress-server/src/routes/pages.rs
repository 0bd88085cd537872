//! Page Routes - Landing and tenant chat pages
//!
//! Minimal server-rendered shells; the real product surface is the JSON API.
//! An unknown tenant slug redirects to the landing page.

use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect},
    routing::get,
    Router,
};

use crate::routes::domain_error;
use crate::AppState;

/// Landing page
pub async fn landing() -> Html<&'static str> {
    Html(
        r#"<!doctype html>
<html>
<head><meta charset="utf-8"><title>Redress</title></head>
<body style="font-family: sans-serif; max-width: 40rem; margin: 4rem auto;">
  <h1>Redress</h1>
  <p>AI-powered refund triage for your support desk.</p>
  <p>Tenant pages live at <code>/&lt;tagline&gt;</code>.</p>
</body>
</html>"#,
    )
}

/// Tenant chat page; unknown slugs bounce back to the landing page
pub async fn tenant_page(
    State(state): State<AppState>,
    Path(tag): Path<String>,
) -> Result<impl IntoResponse, (axum::http::StatusCode, String)> {
    let company = match state
        .company_service
        .get_by_tagline(&tag)
        .await
        .map_err(domain_error)?
    {
        Some(company) => company,
        None => return Ok(Redirect::to("/").into_response()),
    };

    let banner = company.banner_color.as_deref().unwrap_or("#4A90D9");
    let page = format!(
        r#"<!doctype html>
<html>
<head><meta charset="utf-8"><title>{name} Support</title></head>
<body style="font-family: sans-serif; max-width: 40rem; margin: 0 auto;">
  <header style="background: {banner}; color: white; padding: 1rem;">
    <h1>{name} Support</h1>
  </header>
  <div id="log" style="min-height: 16rem; padding: 1rem;"></div>
  <form id="chat" style="display: flex; gap: .5rem; padding: 1rem;">
    <input id="msg" style="flex: 1;" placeholder="Describe your issue..." autocomplete="off">
    <button>Send</button>
  </form>
  <script>
    const companyId = "{company_id}";
    const history = [];
    const log = document.getElementById("log");
    function append(role, text) {{
      const p = document.createElement("p");
      p.textContent = (role === "user" ? "You: " : "Assistant: ") + text;
      log.appendChild(p);
    }}
    document.getElementById("chat").addEventListener("submit", async (e) => {{
      e.preventDefault();
      const input = document.getElementById("msg");
      const message = input.value.trim();
      if (!message) return;
      input.value = "";
      append("user", message);
      const res = await fetch("/api/chat", {{
        method: "POST",
        headers: {{"Content-Type": "application/json"}},
        body: JSON.stringify({{message, history, company_id: companyId}}),
      }});
      const data = await res.json();
      append("model", data.reply ?? "Something went wrong.");
      history.push({{role: "user", content: message}});
      history.push({{role: "model", content: data.reply ?? ""}});
    }});
  </script>
</body>
</html>"#,
        name = company.name,
        banner = banner,
        company_id = company.id,
    );

    Ok(Html(page).into_response())
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(landing))
        .route("/:tag", get(tenant_page))
}

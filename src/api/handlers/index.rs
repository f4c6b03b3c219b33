//! Plain-text endpoint listing served at `/`.

/// Lists the public API.
///
/// # Endpoint
///
/// `GET /`
pub async fn index_handler() -> &'static str {
    concat!(
        "shortlink ",
        env!("CARGO_PKG_VERSION"),
        "\n\n",
        "POST /register          {\"username\", \"password\"} -> {\"token\"}\n",
        "POST /login             {\"username\", \"password\"} -> {\"token\"}\n",
        "POST /shorten           {\"url\"} -> {\"short_url\", \"id\"}   (Bearer token)\n",
        "GET  /redirect/{code}   302 to the original URL\n",
        "GET  /urls              links you created   (Bearer token)\n",
        "GET  /health            component status\n",
    )
}

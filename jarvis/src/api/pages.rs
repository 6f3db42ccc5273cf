//! ランディングページ

use crate::AppState;
use axum::{extract::State, response::Html};

const INDEX_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><title>JARVIS Offline</title></head>
<body style="background:#0A0A0A;color:#00FFFF;font-family:Orbitron;text-align:center">
<h1>JARVIS Offline</h1>
<button id="run">Run Nano-Perfection</button>
<img id="qr" style="margin-top:20px;width:150px">
<pre id="audit" style="margin-top:20px"></pre>
<script>
const QR_URL = __QR_URL__;
document.getElementById('run').addEventListener('click', () => {
  fetch('/nano', {method: 'POST'})
    .then(r => r.json())
    .then(d => {
      document.getElementById('audit').textContent = JSON.stringify(d, null, 2);
      if (!d.error) {
        document.getElementById('qr').src = QR_URL + '?' + Date.now();
      }
    });
});
</script>
</body></html>"#;

/// QR画像URLを埋め込んだランディングページを生成
pub fn render_index(qr_url: &str) -> String {
    // JS文字列リテラルとして埋め込む（</script> を閉じさせない）
    let literal = serde_json::to_string(qr_url)
        .unwrap_or_else(|_| "\"\"".to_string())
        .replace('<', "\\u003c");
    INDEX_TEMPLATE.replace("__QR_URL__", &literal)
}

/// GET / - ランディングページ
pub async fn index(State(state): State<AppState>) -> Html<String> {
    Html(state.landing_page.to_string())
}

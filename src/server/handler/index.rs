use axum::response::Html;

pub const BANNER: &str = "<h1>Servidor del Chatbot funcionando</h1><p>Usa el endpoint /chat para interactuar y /reset para reiniciar la conversación.</p>";

pub async fn index() -> Html<&'static str> {
    Html(BANNER)
}

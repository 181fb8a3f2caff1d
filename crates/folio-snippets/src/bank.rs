//! Default snippet content.

/// Glyph drawn after the typed text while a snippet is still typing.
pub const CURSOR_CHAR: char = '▌';

/// Lines of code the effect picks from.
pub const DEFAULT_BANK: &[&str] = &[
    "let sum = |a: i32, b: i32| a + b;",
    "fn predict(x: f32) -> f32 { model.forward(x) }",
    "struct User { name: String, score: u32 }",
    "const QUERY: &str = \"SELECT name, score FROM users LIMIT 5\";",
    "type LoginData = HashMap<String, String>;",
    "client.post(\"/api/login\").json(&body).send()?;",
    "fn main() { println!(\"hello, world\"); }",
    "impl<T> Node<T> { fn new(v: T) -> Self { Self { v } } }",
    "for i in 0..n { dp[i] = arr.iter().max().copied(); }",
    "let packages = [\"clippy\", \"rustfmt\", \"miri\"];",
    "cargo install --locked ripgrep",
    "git add -A && git commit -m \"feat: ui refinement\"",
    "async fn get_data() -> Result<Response> { fetch(\"/api/data\").await }",
    "cargo new --lib portfolio",
    "kubectl get pods -n prod -o wide",
    "struct History { loss: Vec<f32> }",
    "plot(&History::default().loss);",
    "ssh -i ~/.ssh/id_ed25519 user@server",
];

/// The default bank as owned strings.
pub fn default_bank() -> Vec<String> {
    DEFAULT_BANK.iter().map(|s| s.to_string()).collect()
}

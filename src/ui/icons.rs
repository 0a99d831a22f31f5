pub struct Icons;

impl Icons {
    pub const PIN: &str = "📍";
    pub const CHECK: &str = "✅";
    pub const CROSS: &str = "❌";
    pub const WARN: &str = "⚠️";
    pub const INFO: &str = "ℹ️";
    pub const STATS: &str = "📊";
    pub const DEL: &str = "🗑️";
    pub const DATABASE: &str = "🗄️";
    pub const QUESTION: &str = "❓";
}

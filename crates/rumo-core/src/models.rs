//! Domain models for Rumo
//!
//! Persisted entities (check-ins, ledger entries, projects, alerts, decisions)
//! plus the plain summaries the rule layer consumes. All money is `i64` in
//! minor currency units.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::rules::state::classify_state;

/// Format minor currency units as a decimal amount (e.g. `-1234` → `-12.34`)
pub fn format_amount(minor: i64) -> String {
    let sign = if minor < 0 { "-" } else { "" };
    let abs = minor.unsigned_abs();
    format!("{}{}.{:02}", sign, abs / 100, abs % 100)
}

/// Self-rated cash-flow feeling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaixaStatus {
    Tranquilo,
    Atencao,
    Critico,
}

impl CaixaStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tranquilo => "tranquilo",
            Self::Atencao => "atencao",
            Self::Critico => "critico",
        }
    }

    /// Normalized score on a 0–1 scale (tranquilo = 1)
    pub fn score(&self) -> f64 {
        match self {
            Self::Tranquilo => 1.0,
            Self::Atencao => 0.5,
            Self::Critico => 0.0,
        }
    }
}

impl std::str::FromStr for CaixaStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tranquilo" => Ok(Self::Tranquilo),
            "atencao" | "atenção" => Ok(Self::Atencao),
            "critico" | "crítico" => Ok(Self::Critico),
            _ => Err(format!("Unknown caixa status: {}", s)),
        }
    }
}

impl std::fmt::Display for CaixaStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Self-rated energy level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Energia {
    Alta,
    Media,
    Baixa,
}

impl Energia {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Alta => "alta",
            Self::Media => "media",
            Self::Baixa => "baixa",
        }
    }

    /// Ordinal level: alta = 3, media = 2, baixa = 1
    pub fn level(&self) -> u8 {
        match self {
            Self::Alta => 3,
            Self::Media => 2,
            Self::Baixa => 1,
        }
    }

    /// Inverse of [`Energia::level`], clamping out-of-range values
    pub fn from_level(level: i32) -> Self {
        match level {
            i32::MIN..=1 => Self::Baixa,
            2 => Self::Media,
            _ => Self::Alta,
        }
    }

    /// Normalized score on a 0–1 scale (alta = 1)
    pub fn score(&self) -> f64 {
        match self {
            Self::Alta => 1.0,
            Self::Media => 0.5,
            Self::Baixa => 0.0,
        }
    }
}

impl std::str::FromStr for Energia {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "alta" => Ok(Self::Alta),
            "media" | "média" => Ok(Self::Media),
            "baixa" => Ok(Self::Baixa),
            _ => Err(format!("Unknown energia: {}", s)),
        }
    }
}

impl std::fmt::Display for Energia {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Self-rated time/workload pressure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pressao {
    Leve,
    Normal,
    Alta,
}

impl Pressao {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Leve => "leve",
            Self::Normal => "normal",
            Self::Alta => "alta",
        }
    }
}

impl std::str::FromStr for Pressao {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "leve" => Ok(Self::Leve),
            "normal" => Ok(Self::Normal),
            "alta" => Ok(Self::Alta),
            _ => Err(format!("Unknown pressao: {}", s)),
        }
    }
}

impl std::fmt::Display for Pressao {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Derived operational state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OperationalState {
    Attack,
    Caution,
    Critical,
}

impl OperationalState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Attack => "ATTACK",
            Self::Caution => "CAUTION",
            Self::Critical => "CRITICAL",
        }
    }

    /// Contribution to the blended health score
    pub fn score(&self) -> f64 {
        match self {
            Self::Attack => 100.0,
            Self::Caution => 60.0,
            Self::Critical => 20.0,
        }
    }
}

impl std::str::FromStr for OperationalState {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "ATTACK" => Ok(Self::Attack),
            "CAUTION" => Ok(Self::Caution),
            "CRITICAL" => Ok(Self::Critical),
            _ => Err(format!("Unknown operational state: {}", s)),
        }
    }
}

impl std::fmt::Display for OperationalState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A daily self-reported check-in (one per user per day)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Checkin {
    pub id: i64,
    pub user_id: i64,
    pub date: NaiveDate,
    pub caixa_status: CaixaStatus,
    pub energia: Energia,
    pub pressao: Pressao,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estado_calculado: Option<OperationalState>,
}

impl Checkin {
    /// State derived from this check-in's answers
    pub fn computed_state(&self) -> OperationalState {
        classify_state(self)
    }

    /// Attach the derived state (the only mutation a check-in receives)
    pub fn with_computed_state(mut self) -> Self {
        self.estado_calculado = Some(self.computed_state());
        self
    }

    /// True for days counted as "bad" by overload detection
    pub fn is_bad_day(&self) -> bool {
        self.energia == Energia::Baixa
            || self.pressao == Pressao::Alta
            || self.caixa_status == CaixaStatus::Critico
    }
}

/// Ledger entry direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    Entrada,
    Saida,
}

impl EntryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Entrada => "entrada",
            Self::Saida => "saida",
        }
    }
}

impl std::str::FromStr for EntryType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "entrada" => Ok(Self::Entrada),
            "saida" | "saída" => Ok(Self::Saida),
            _ => Err(format!("Unknown entry type: {}", s)),
        }
    }
}

impl std::fmt::Display for EntryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A ledger entry. `value` is always positive; direction comes from `entry_type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialEntry {
    pub id: i64,
    pub user_id: i64,
    #[serde(rename = "type")]
    pub entry_type: EntryType,
    /// Minor currency units
    pub value: i64,
    pub category: String,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl FinancialEntry {
    pub fn is_income(&self) -> bool {
        self.entry_type == EntryType::Entrada
    }

    pub fn is_expense(&self) -> bool {
        self.entry_type == EntryType::Saida
    }
}

/// Project lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    Active,
    Paused,
    Done,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Paused => "paused",
            Self::Done => "done",
        }
    }
}

impl std::str::FromStr for ProjectStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "paused" => Ok(Self::Paused),
            "done" => Ok(Self::Done),
            _ => Err(format!("Unknown project status: {}", s)),
        }
    }
}

impl std::fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A user project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub status: ProjectStatus,
    pub objective: String,
    #[serde(default)]
    pub next_action: Option<String>,
    pub created_at: DateTime<Utc>,
    /// Sole staleness signal for stalled detection
    pub updated_at: DateTime<Utc>,
}

impl Project {
    pub fn is_active(&self) -> bool {
        self.status == ProjectStatus::Active
    }

    /// Next action, treating blank strings as missing
    pub fn next_action(&self) -> Option<&str> {
        self.next_action
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// Alert categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertType {
    Finance,
    Project,
    System,
    Overload,
}

impl AlertType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Finance => "finance",
            Self::Project => "project",
            Self::System => "system",
            Self::Overload => "overload",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Finance => "Finance",
            Self::Project => "Project",
            Self::System => "System",
            Self::Overload => "Overload",
        }
    }
}

impl std::str::FromStr for AlertType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "finance" => Ok(Self::Finance),
            "project" => Ok(Self::Project),
            "system" => Ok(Self::System),
            "overload" => Ok(Self::Overload),
            _ => Err(format!("Unknown alert type: {}", s)),
        }
    }
}

impl std::fmt::Display for AlertType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A persisted alert
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub id: i64,
    pub user_id: i64,
    #[serde(rename = "type")]
    pub alert_type: AlertType,
    pub message: String,
    pub date: NaiveDate,
    pub resolved: bool,
}

/// An alert produced by the rule layer, before the store assigns identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertDraft {
    pub user_id: i64,
    #[serde(rename = "type")]
    pub alert_type: AlertType,
    pub message: String,
}

impl AlertDraft {
    pub fn new(user_id: i64, alert_type: AlertType, message: impl Into<String>) -> Self {
        Self {
            user_id,
            alert_type,
            message: message.into(),
        }
    }

    /// Promote to a persisted alert once the store has assigned an id and date
    pub fn into_alert(self, id: i64, date: NaiveDate) -> Alert {
        Alert {
            id,
            user_id: self.user_id,
            alert_type: self.alert_type,
            message: self.message,
            date,
            resolved: false,
        }
    }
}

/// A recorded decision (read-only input to weekly summaries)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    pub id: i64,
    pub user_id: i64,
    pub context: String,
    pub decision: String,
    pub date: NaiveDate,
}

/// Ledger totals over a window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FinanceSummary {
    pub total_entradas: i64,
    pub total_saidas: i64,
    pub balance: i64,
    pub avg_daily_spending: i64,
    /// Days the balance lasts at the average daily spending; `None` when nothing is spent
    pub forecast_days: Option<i64>,
}

impl FinanceSummary {
    /// saidas / entradas; `None` when there is no income
    pub fn spending_ratio(&self) -> Option<f64> {
        if self.total_entradas > 0 {
            Some(self.total_saidas as f64 / self.total_entradas as f64)
        } else {
            None
        }
    }
}

/// Project counts by status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProjectStats {
    pub total: usize,
    pub active: usize,
    pub paused: usize,
    pub done: usize,
    pub stalled: usize,
}

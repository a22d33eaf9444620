/// Data layer: core types, loading, filtering, aggregation and export.
///
/// Architecture:
/// ```text
///  regular .csv / .json / .parquet     playoffs .csv / .json / .parquet
///        │                                   │
///        ▼                                   ▼
///   ┌──────────┐                        ┌──────────┐
///   │  loader   │  parse file → Dataset │  loader   │
///   └──────────┘                        └──────────┘
///        └──────────────┬────────────────────┘
///                       ▼
///                ┌──────────────┐
///                │    cache      │  Arc<Datasets>, reload on mtime change
///                └──────────────┘
///                       │
///                       ▼
///                ┌──────────────┐
///                │    filter     │  source → team → min games → FilteredView
///                └──────────────┘
///                       │
///                       ▼
///                ┌──────────────┐
///                │  aggregate    │  overview / top scorers / comparison
///                └──────────────┘
///                       │
///                       ▼
///                ┌──────────────┐
///                │   export      │  Table → .csv / .xlsx bytes
///                └──────────────┘
/// ```

pub mod aggregate;
pub mod cache;
pub mod error;
pub mod export;
pub mod filter;
pub mod loader;
pub mod model;

/// Well-known column names.
pub mod columns {
    pub const PLAYER: &str = "Player";
    pub const TEAM: &str = "Team";
    pub const GAMES: &str = "G";
    pub const POINTS: &str = "PTS";
    pub const ASSISTS: &str = "AST";
    pub const REBOUNDS: &str = "TRB";
    pub const STEALS: &str = "STL";
    pub const BLOCKS: &str = "BLK";
    pub const MINUTES: &str = "MP";
}

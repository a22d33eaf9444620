use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn range(&mut self, lo: i64, hi: i64) -> i64 {
        lo + (self.next_f64() * (hi - lo + 1) as f64) as i64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

const TEAMS: [&str; 8] = ["BOS", "DEN", "GSW", "LAL", "MIA", "MIL", "NYK", "PHX"];
const FIRST: [&str; 10] = [
    "Jalen", "Marcus", "Tyrese", "Devin", "Luka", "Jaylen", "Anthony", "Darius", "Kevin", "Nikola",
];
const LAST: [&str; 8] = [
    "Brooks", "Carter", "Holiday", "Murray", "Porter", "Reed", "Walker", "Young",
];

const COLUMNS: [&str; 10] = [
    "Player", "Team", "G", "MP", "PTS", "AST", "TRB", "STL", "BLK", "Pos",
];

/// One generated stat line.
struct Line {
    player: String,
    team: String,
    games: i64,
    minutes: f64,
    points: f64,
    assists: f64,
    rebounds: f64,
    steals: f64,
    blocks: f64,
    position: String,
}

/// Per-player base ability, shared by the regular season and playoff lines.
struct Profile {
    player: String,
    team: &'static str,
    scoring: f64,
    playmaking: f64,
    size: f64,
    position: &'static str,
}

fn round1(v: f64) -> f64 {
    (v.max(0.0) * 10.0).round() / 10.0
}

fn profiles(rng: &mut SimpleRng) -> Vec<Profile> {
    let positions = ["PG", "SG", "SF", "PF", "C"];
    let mut out = Vec::new();
    for (i, first) in FIRST.iter().enumerate() {
        for (j, last) in LAST.iter().enumerate() {
            if (i + j) % 2 == 1 {
                continue;
            }
            out.push(Profile {
                player: format!("{first} {last}"),
                team: TEAMS[(i * 3 + j) % TEAMS.len()],
                scoring: rng.gauss(14.0, 6.0).clamp(2.0, 34.0),
                playmaking: rng.gauss(3.5, 2.0).clamp(0.3, 11.0),
                size: rng.next_f64(),
                position: positions[(i + j) % positions.len()],
            });
        }
    }
    out
}

fn stat_line(p: &Profile, games: i64, boost: f64, rng: &mut SimpleRng) -> Line {
    let minutes = round1(rng.gauss(14.0 + p.scoring * 0.7, 3.0).min(42.0));
    Line {
        player: p.player.clone(),
        team: p.team.to_string(),
        games,
        minutes,
        points: round1(rng.gauss(p.scoring * boost, 2.0)),
        assists: round1(rng.gauss(p.playmaking, 0.8)),
        rebounds: round1(rng.gauss(3.0 + p.size * 8.0, 1.2)),
        steals: round1(rng.gauss(0.9, 0.3)),
        blocks: round1(rng.gauss(0.2 + p.size * 1.5, 0.3)),
        position: p.position.to_string(),
    }
}

fn regular_season(profiles: &[Profile], rng: &mut SimpleRng) -> Vec<Line> {
    profiles
        .iter()
        .map(|p| {
            let games = rng.range(10, 82);
            stat_line(p, games, 1.0, rng)
        })
        .collect()
}

/// Only teams in the first half of `TEAMS` make the playoffs.
fn playoffs(profiles: &[Profile], rng: &mut SimpleRng) -> Vec<Line> {
    let qualified = &TEAMS[..TEAMS.len() / 2];
    profiles
        .iter()
        .filter(|p| qualified.contains(&p.team))
        .map(|p| {
            let games = rng.range(4, 24);
            let boost = rng.gauss(1.05, 0.1);
            stat_line(p, games, boost, rng)
        })
        .collect()
}

fn write_csv(path: &Path, lines: &[Line]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    writer.write_record(COLUMNS)?;
    for l in lines {
        writer.write_record([
            l.player.clone(),
            l.team.clone(),
            l.games.to_string(),
            l.minutes.to_string(),
            l.points.to_string(),
            l.assists.to_string(),
            l.rebounds.to_string(),
            l.steals.to_string(),
            l.blocks.to_string(),
            l.position.clone(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn write_parquet(path: &Path, lines: &[Line]) -> Result<()> {
    let text = |f: fn(&Line) -> &str| -> ArrayRef {
        Arc::new(StringArray::from(lines.iter().map(f).collect::<Vec<_>>()))
    };
    let float = |f: fn(&Line) -> f64| -> ArrayRef {
        Arc::new(Float64Array::from(lines.iter().map(f).collect::<Vec<_>>()))
    };

    let schema = Arc::new(Schema::new(vec![
        Field::new("Player", DataType::Utf8, false),
        Field::new("Team", DataType::Utf8, false),
        Field::new("G", DataType::Int64, false),
        Field::new("MP", DataType::Float64, false),
        Field::new("PTS", DataType::Float64, false),
        Field::new("AST", DataType::Float64, false),
        Field::new("TRB", DataType::Float64, false),
        Field::new("STL", DataType::Float64, false),
        Field::new("BLK", DataType::Float64, false),
        Field::new("Pos", DataType::Utf8, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            text(|l| l.player.as_str()),
            text(|l| l.team.as_str()),
            Arc::new(Int64Array::from(
                lines.iter().map(|l| l.games).collect::<Vec<_>>(),
            )),
            float(|l| l.minutes),
            float(|l| l.points),
            float(|l| l.assists),
            float(|l| l.rebounds),
            float(|l| l.steals),
            float(|l| l.blocks),
            text(|l| l.position.as_str()),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

/// Writes `data_clean_regulier` and `data_clean_playoffs` as both `.csv` and
/// `.parquet` into the directory given as first argument (default `.`).
fn main() -> Result<()> {
    let out_dir = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;

    let mut rng = SimpleRng::new(42);
    let profiles = profiles(&mut rng);
    let regular = regular_season(&profiles, &mut rng);
    let playoffs = playoffs(&profiles, &mut rng);

    for (stem, lines) in [
        ("data_clean_regulier", &regular),
        ("data_clean_playoffs", &playoffs),
    ] {
        write_csv(&out_dir.join(format!("{stem}.csv")), lines)?;
        write_parquet(&out_dir.join(format!("{stem}.parquet")), lines)?;
        println!("Wrote {} rows to {}/{stem}.{{csv,parquet}}", lines.len(), out_dir.display());
    }
    Ok(())
}

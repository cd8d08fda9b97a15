//! Potflow 流れ場サンプラー
//!
//! ケースファイルを読み込み、格子上で全要素を重ね合わせた結果を JSON スナップショットに書き出す。

mod summary;

use std::path::PathBuf;

use clap::Parser;
use log::LevelFilter;

use potflow_io::{Case, CaseFile, Snapshot};

/// ポテンシャル流の解析解を格子上で評価する
#[derive(Parser)]
#[command(name = "flow-sampler")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Evaluate superposed potential-flow elements on a sampling grid", long_about = None)]
struct Cli {
    /// ケースファイル（JSON）
    #[arg(short, long)]
    case: PathBuf,

    /// 出力スナップショット（JSON）
    #[arg(short, long, default_value = "flow.json")]
    output: PathBuf,

    /// ログレベル (off, error, warn, info, debug, trace)。指定時は RUST_LOG より優先
    #[arg(short, long, value_parser = clap::value_parser!(LevelFilter))]
    log_level: Option<LevelFilter>,
}

/// `filters` は RUST_LOG 形式のディレクティブ（`potflow_models=debug` など）。
/// 未設定なら `info`。`level` を与えた場合は全体のレベルをそれで上書きする。
fn logger_builder(filters: Option<&str>, level: Option<LevelFilter>) -> env_logger::Builder {
    let mut builder = env_logger::Builder::new();
    builder.parse_filters(filters.unwrap_or("info"));
    if let Some(level) = level {
        builder.filter_level(level);
    }
    builder
}

fn init_logging(level: Option<LevelFilter>) {
    let filters = std::env::var("RUST_LOG").ok();
    logger_builder(filters.as_deref(), level).init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.log_level);

    let case_file = CaseFile::load(&cli.case)?;
    log::info!(
        "case '{}': {} elements",
        case_file.name,
        case_file.elements.len()
    );

    let snapshot = match case_file.build()? {
        Case::Cartesian(scenario) => {
            let field = if case_file.parallel {
                scenario.evaluate_parallel()?
            } else {
                scenario.evaluate()?
            };
            log::info!("{}", summary::FieldSummary::of(&field));
            Snapshot::from_flow(&case_file.name, scenario.grid(), &field)
        }
        Case::Polar(scenario) => {
            let field = scenario.evaluate();
            let cartesian = field.to_cartesian(scenario.grid().theta());
            log::info!("{}", summary::FieldSummary::of(&cartesian));
            Snapshot::from_polar(&case_file.name, scenario.grid(), &field)
        }
    };

    snapshot.write_json(&cli.output)?;
    Ok(())
}

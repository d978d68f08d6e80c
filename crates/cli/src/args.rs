// crates/cli/src/args.rs
use crate::options::{LogLevel, OrderArg, OutputFormat};
use clap::{Args as ClapArgs, Parser};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "subrename",
    version = crate::VERSION,
    about = "ファイル名・ディレクトリ名に含まれる部分文字列を再帰的に置換します"
)]
pub struct Args {
    /// 対象のルートディレクトリ（ルート自身も名前が一致すれば対象）
    pub root: PathBuf,

    /// 置換前の部分文字列（空文字は不可）
    pub old: String,

    /// 置換後の部分文字列（省略時は削除）
    #[arg(default_value = "")]
    pub new: String,

    #[command(flatten)]
    pub behavior: BehaviorArgs,

    #[command(flatten)]
    pub scan: ScanArgs,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct BehaviorArgs {
    /// 大文字小文字を区別しない
    #[arg(short = 'i', long)]
    pub ignore_case: bool,

    /// 実際には変更せず、変更予定のみ表示
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// 衝突・エラーをスキップして処理を続行
    #[arg(short = 'k', long)]
    pub skip_errors: bool,

    /// 適用順序
    #[arg(long, value_enum, default_value = "collect")]
    pub order: OrderArg,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct ScanArgs {
    /// シンボリックリンクを辿る
    #[arg(long)]
    pub follow_links: bool,

    /// 最大探索深さ（ルート = 0）
    #[arg(long)]
    pub max_depth: Option<usize>,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct OutputArgs {
    /// 出力フォーマット
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// サマリのみ表示
    #[arg(short = 'q', long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// 一致したエントリと無変更のエントリも表示
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// ログレベル（RUST_LOG が設定されていればそちらを優先）
    #[arg(long, value_enum, default_value = "warn")]
    pub log_level: LogLevel,
}

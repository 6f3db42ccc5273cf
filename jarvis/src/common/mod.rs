//! 共通型・エラー定義

/// エラー型
pub mod error;

/// レスポンス・計測結果の型
pub mod types;

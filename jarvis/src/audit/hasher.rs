//! 監査ダイジェスト計算

use sha2::{Digest, Sha256};

/// SHA-256ダイジェストの16進文字列長
pub const DIGEST_HEX_LEN: usize = 64;

/// 入力バイト列のSHA-256ダイジェストを小文字16進で返す
pub fn digest_hex(input: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input);
    format!("{:x}", hasher.finalize())
}

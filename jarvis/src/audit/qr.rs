//! QRコード画像の生成と書き込み
//!
//! ダイジェスト文字列をPNG形式のQRコードにレンダリングし、
//! 一時ファイル経由のrenameで出力先を置き換える（書きかけのファイルを配信しない）。

use crate::common::error::{JarvisError, JarvisResult};
use image::{DynamicImage, ImageFormat, Luma};
use qrcode::QrCode;
use std::io::{Cursor, Write};
use std::path::Path;

/// 1モジュールあたりのピクセル数
pub const MODULE_PIXELS: u32 = 10;

const TEMP_PREFIX: &str = ".qr-";
const TEMP_SUFFIX: &str = ".tmp";

/// 書き込み途中の一時ファイル名か
pub fn is_temp_file_name(name: &str) -> bool {
    name.starts_with(TEMP_PREFIX) && name.ends_with(TEMP_SUFFIX)
}

/// 文字列をPNG形式のQRコードにレンダリング
///
/// クワイエットゾーン（4モジュール）付き。
pub fn render_png(data: &str) -> JarvisResult<Vec<u8>> {
    let code = QrCode::new(data.as_bytes()).map_err(|e| JarvisError::Encode(e.to_string()))?;
    let image = code
        .render::<Luma<u8>>()
        .module_dimensions(MODULE_PIXELS, MODULE_PIXELS)
        .quiet_zone(true)
        .build();

    let mut png = Vec::new();
    DynamicImage::ImageLuma8(image)
        .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .map_err(|e| JarvisError::Encode(e.to_string()))?;
    Ok(png)
}

/// バイト列を `path` にアトミックに書き込む
///
/// 同じディレクトリに一時ファイルを作成してからrenameする。
/// 並行実行時は最後にrenameしたものが残る。
pub fn write_atomic(path: &Path, bytes: &[u8]) -> JarvisResult<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let storage_err = |e: std::io::Error| JarvisError::Storage(format!("{}: {}", path.display(), e));

    std::fs::create_dir_all(dir).map_err(storage_err)?;

    let mut tmp = tempfile::Builder::new()
        .prefix(TEMP_PREFIX)
        .suffix(TEMP_SUFFIX)
        .tempfile_in(dir)
        .map_err(storage_err)?;
    tmp.write_all(bytes).map_err(storage_err)?;
    tmp.as_file().sync_all().map_err(storage_err)?;
    tmp.persist(path).map_err(|e| storage_err(e.error))?;
    Ok(())
}

/// ダイジェストをQRコード化して `path` に書き込む
pub fn write_qr(path: &Path, data: &str) -> JarvisResult<()> {
    let png = render_png(data)?;
    write_atomic(path, &png)
}

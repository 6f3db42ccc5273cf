//! CUDAデバイスプローブ
//!
//! `cudarc` でデバイスを開き、NVMLでGPU名を取得する。

use super::{DeviceProbe, PROBE_ELEMENTS};
use crate::common::error::{JarvisError, JarvisResult};
use cudarc::driver::CudaDevice;
use nvml_wrapper::Nvml;
use std::sync::Arc;
use tracing::debug;

/// CUDAデバイス上にバッファを確保するプローブ
pub struct CudaProbe {
    device: Arc<CudaDevice>,
    label: String,
}

impl CudaProbe {
    /// `ordinal` 番目のCUDAデバイスを開く
    ///
    /// ラベルは `label_override`、NVMLのデバイス名、CUDAドライバのデバイス名、
    /// `cuda:<ordinal>` の順に決定する。
    pub fn open(ordinal: usize, label_override: Option<String>) -> JarvisResult<Self> {
        let device = CudaDevice::new(ordinal).map_err(|e| {
            JarvisError::DeviceUnavailable(format!(
                "no usable CUDA device at ordinal {}: {}",
                ordinal, e
            ))
        })?;

        let label = label_override
            .or_else(|| nvml_device_name(ordinal))
            .or_else(|| device.name().ok())
            .unwrap_or_else(|| format!("cuda:{}", ordinal));

        Ok(Self { device, label })
    }
}

fn nvml_device_name(ordinal: usize) -> Option<String> {
    let nvml = match Nvml::init() {
        Ok(nvml) => nvml,
        Err(e) => {
            debug!("NVML unavailable: {}", e);
            return None;
        }
    };
    let index = u32::try_from(ordinal).ok()?;
    let device = nvml.device_by_index(index).ok()?;
    device.name().ok()
}

impl DeviceProbe for CudaProbe {
    fn label(&self) -> &str {
        &self.label
    }

    fn exercise(&self) -> JarvisResult<()> {
        let buffer = self
            .device
            .alloc_zeros::<f32>(PROBE_ELEMENTS)
            .map_err(|e| JarvisError::Device(format!("allocation failed: {}", e)))?;
        self.device
            .synchronize()
            .map_err(|e| JarvisError::Device(format!("synchronize failed: {}", e)))?;
        drop(buffer);
        Ok(())
    }
}

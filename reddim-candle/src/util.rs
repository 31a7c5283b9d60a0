//! Utilities.
use anyhow::Result;
use candle_core::{DType, Device, Tensor};
use ndarray::Array2;

/// Converts a batch of states to a `(batch, dim)` tensor on `device`.
pub fn array2_to_tensor(batch: &Array2<f32>, device: &Device) -> Result<Tensor> {
    let v = batch.iter().cloned().collect::<Vec<f32>>();
    Ok(Tensor::from_vec(v, batch.dim(), device)?)
}

/// Converts the output of a model back to a batch of states.
///
/// A tensor of rank other than 2 is taken as a single row.
pub fn tensor_to_array2(t: &Tensor) -> Result<Array2<f32>> {
    let t = t.detach().to_device(&Device::Cpu)?.to_dtype(DType::F32)?;
    let v: Vec<f32> = t.flatten_all()?.to_vec1()?;
    let shape = match t.dims() {
        &[rows, cols] => (rows, cols),
        _ => (1, v.len()),
    };
    Ok(Array2::from_shape_vec(shape, v)?)
}

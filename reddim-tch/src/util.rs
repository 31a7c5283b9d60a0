//! Utilities.
use anyhow::Result;
use ndarray::Array2;
use std::convert::TryFrom;
use tch::{Device, Kind, Tensor};

/// Converts a batch of states to a `(batch, dim)` float tensor on `device`.
pub fn array2_to_tensor(batch: &Array2<f32>, device: Device) -> Result<Tensor> {
    let (rows, cols) = batch.dim();
    let v = batch.iter().cloned().collect::<Vec<f32>>();
    let t = Tensor::from_slice(&v).f_reshape(&[rows as i64, cols as i64])?;
    Ok(t.to_device(device))
}

/// Converts the output of a model back to a batch of states.
///
/// A tensor of rank other than 2 is taken as a single row.
pub fn tensor_to_array2(t: &Tensor) -> Result<Array2<f32>> {
    let t = t.to_device(Device::Cpu).to_kind(Kind::Float);
    let size = t.size();
    let v = Vec::<f32>::try_from(&t.flatten(0, -1))?;
    let shape = match size.as_slice() {
        &[rows, cols] => (rows as usize, cols as usize),
        _ => (1, v.len()),
    };
    Ok(Array2::from_shape_vec(shape, v)?)
}

#[cfg(test)]
mod test {
    use super::*;
    use ndarray::arr2;

    #[test]
    fn test_tensor_conversion() -> Result<()> {
        let batch = arr2(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
        let t = array2_to_tensor(&batch, Device::Cpu)?;
        assert_eq!(t.size(), vec![2, 3]);
        assert_eq!(tensor_to_array2(&t)?, batch);
        Ok(())
    }

    #[test]
    fn test_rank1_output_is_one_row() -> Result<()> {
        let t = Tensor::from_slice(&[1.0f32, 2.0]);
        assert_eq!(tensor_to_array2(&t)?, arr2(&[[1.0, 2.0]]));
        Ok(())
    }
}

//! Conversion between numpy arrays and [`ndarray`] arrays.
use anyhow::{anyhow, Result};
use ndarray::{Array1, Array3};
use num_traits::cast::AsPrimitive;
use numpy::{Element, PyArray1, PyArray3};
use pyo3::{types::PyAny, IntoPy, PyObject, Python};
use reddim_core::BoxSpace;

fn extract_array1<T>(obj: &PyAny) -> Option<Array1<f32>>
where
    T: Element + AsPrimitive<f32>,
{
    let arr: &PyArray1<T> = obj.extract().ok()?;
    Some(arr.to_owned_array().mapv(|x| x.as_()))
}

/// Converts a one dimensional numpy array of `float32` or `float64` to [`Array1<f32>`].
pub fn pyany_to_array1(obj: &PyAny) -> Result<Array1<f32>> {
    extract_array1::<f32>(obj)
        .or_else(|| extract_array1::<f64>(obj))
        .ok_or_else(|| anyhow!("expected a 1-d float array, got {}", obj))
}

/// Same as [`pyany_to_array1`] for a [`PyObject`].
pub fn pyobj_to_array1(obj: &PyObject) -> Result<Array1<f32>> {
    Python::with_gil(|py| pyany_to_array1(obj.as_ref(py)))
}

/// Converts [`Array1<f32>`] to a numpy array.
pub fn array1_to_pyobj(act: &Array1<f32>) -> PyObject {
    Python::with_gil(|py| PyArray1::<f32>::from_array(py, act).into_py(py))
}

/// Converts a frame returned by `render()` of a Python environment.
///
/// `None` in Python gives `None`.
pub fn pyobj_to_frame(frame: &PyObject) -> Result<Option<Array3<u8>>> {
    Python::with_gil(|py| {
        if frame.is_none(py) {
            return Ok(None);
        }
        let arr: &PyArray3<u8> = frame.extract(py)?;
        Ok(Some(arr.to_owned_array()))
    })
}

/// Reads `low` and `high` of a `gymnasium.spaces.Box` object.
pub fn pyobj_to_box_space(space: &PyObject) -> Result<BoxSpace> {
    let (low, high) = Python::with_gil(|py| -> Result<_> {
        let low = pyany_to_array1(space.getattr(py, "low")?.as_ref(py))?;
        let high = pyany_to_array1(space.getattr(py, "high")?.as_ref(py))?;
        Ok((low, high))
    })?;
    BoxSpace::new(low, high)
}

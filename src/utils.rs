#[cfg(feature = "python-bindings")]
use ndarray::{Array1, Array2};

#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyValueError, prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::composition::core::{data::CompositionData, shape::CompositionShape};

#[cfg(feature = "python-bindings")]
use numpy::{
    IntoPyArray,    // Vec → PyArray
    PyArrayMethods, // .readonly()
    PyReadonlyArray1, PyReadonlyArray2,
};

#[cfg(feature = "python-bindings")]
#[inline]
pub fn extract_f64_array<'py>(
    py: Python<'py>, raw_data: &Bound<'py, PyAny>,
) -> PyResult<PyReadonlyArray1<'py, f64>> {
    if let Ok(arr_ro) = raw_data.extract::<PyReadonlyArray1<f64>>() {
        if arr_ro.as_slice().is_ok() {
            return Ok(arr_ro);
        }
    }

    if let Ok(obj) = raw_data.call_method("to_numpy", (false,), None) {
        if let Ok(series_ro) = obj.extract::<PyReadonlyArray1<f64>>() {
            if series_ro.as_slice().is_ok() {
                return Ok(series_ro);
            }
        }
    }

    let vec: Vec<f64> = raw_data.extract().map_err(|_| {
        pyo3::exceptions::PyTypeError::new_err(
            "expected a 1-D numpy.ndarray, pandas.Series, or sequence of float64",
        )
    })?;
    Ok(vec.into_pyarray(py).readonly())
}

#[cfg(feature = "python-bindings")]
#[inline]
pub fn extract_f64_matrix<'py>(
    raw_data: &Bound<'py, PyAny>, name: &str,
) -> PyResult<Array2<f64>> {
    if let Ok(arr_ro) = raw_data.extract::<PyReadonlyArray2<f64>>() {
        return Ok(arr_ro.as_array().to_owned());
    }

    if let Ok(obj) = raw_data.call_method("to_numpy", (false,), None) {
        if let Ok(frame_ro) = obj.extract::<PyReadonlyArray2<f64>>() {
            return Ok(frame_ro.as_array().to_owned());
        }
    }

    Err(pyo3::exceptions::PyTypeError::new_err(format!(
        "{name} must be a 2-D numpy.ndarray or pandas.DataFrame of float64",
    )))
}

#[cfg(feature = "python-bindings")]
pub fn extract_f64_vector<'py>(
    py: Python<'py>, raw_data: &Bound<'py, PyAny>, name: &str,
) -> PyResult<Array1<f64>> {
    let arr = extract_f64_array(py, raw_data)?;
    let slice = arr.as_slice().map_err(|_| {
        PyValueError::new_err(format!(
            "{name} must be a 1-D contiguous float64 array or sequence"
        ))
    })?;
    Ok(Array1::from(slice.to_vec()))
}

#[cfg(feature = "python-bindings")]
pub fn build_composition_data<'py>(
    py: Python<'py>, coarse: &Bound<'py, PyAny>, fine: &Bound<'py, PyAny>,
    carbon: &Bound<'py, PyAny>, temperature: &Bound<'py, PyAny>, shape: CompositionShape,
) -> PyResult<CompositionData> {
    let coarse_mat = extract_f64_matrix(coarse, "coarse")?;
    let fine_mat = extract_f64_matrix(fine, "fine")?;
    let carbon_vec = extract_f64_vector(py, carbon, "carbon")?;
    let temperature_vec = extract_f64_vector(py, temperature, "temperature")?;

    let data = CompositionData::new(coarse_mat, fine_mat, carbon_vec, temperature_vec, shape);
    match data {
        Ok(data) => Ok(data),
        Err(e) => Err(e.into()),
    }
}

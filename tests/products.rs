/* ************************************************************************ **
** This file is part of toyla, and is licensed under EITHER the MIT license **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

#[macro_use] extern crate toyla_assert_close;

use ::rand::random;
use ::pretty_assertions::assert_eq;
use ::toyla::{ToyMatrix, ToyVector, RangeCheck, Settings, YamlRead, ArithError, FailResult};

fn init_logger() {
    let _ = ::env_logger::try_init();
}

fn random_matrix(dims: (usize, usize)) -> ToyMatrix<f64> {
    let data = (0..dims.0 * dims.1).map(|_| random::<f64>() - 0.5).collect();
    ToyMatrix::from_row_major_data(dims, data)
}

// an eagerly transposed copy
fn explicit_transpose(m: &ToyMatrix<f64>) -> ToyMatrix<f64> {
    let (rows, cols) = m.dims();
    let mut out = ToyMatrix::new((cols, rows));
    for r in 0..rows {
        for c in 0..cols {
            out[(c, r)] = m[(r, c)];
        }
    }
    out
}

#[test]
fn switch_from_yaml() {
    init_logger();

    let a = ToyMatrix::from_row_major_data((2, 2), vec![
        1, i32::max_value(),
        0, 1,
    ]);
    let b = ToyMatrix::from_row_major_data((2, 2), vec![
        1, 0,
        0, 2,
    ]);

    let settings = Settings::from_reader("range-check: disabled".as_bytes()).unwrap();
    let product = a.matmul_with(&b, settings.range_check).unwrap();
    assert_eq!(product.to_row_major_vec(), vec![1, -2, 0, 2]);

    let settings = Settings::from_reader("range-check: enabled".as_bytes()).unwrap();
    let mut target = a.clone();
    match target.matmul_assign_with(&b, settings.range_check) {
        Err(ArithError::RangeExceeded(e)) => assert_eq!((e.op1, e.op2), (i32::max_value(), 2)),
        r => panic!("unexpected: {:?}", r),
    }
    assert_eq!(target, a);
}

#[test]
fn switch_from_file() {
    init_logger();

    let path = ::std::env::temp_dir().join(format!("toyla-settings-{}.yaml", ::std::process::id()));
    ::std::fs::write(&path, "range-check: disabled\n").unwrap();
    let check = ::toyla::range_check_from_path(&path);
    let _ = ::std::fs::remove_file(&path);

    assert_eq!(check.unwrap(), RangeCheck::Disabled);
}

#[test]
fn errors_convert_to_failure() {
    fn run() -> FailResult<ToyVector<i8>> {
        let mut v = ToyVector::from_data(vec![1i8, 100]);
        v.transpose();
        let m = ToyMatrix::from_row_major_data((2, 1), vec![1i8, 2]);
        Ok(v.vecmat_with(&m, RangeCheck::Enabled)?)
    }

    let err = run().unwrap_err();
    assert_eq!(err.to_string(), "product of 100 and 2 leaves the range of its type");
}

#[test]
fn lazy_transpose_matches_eager() {
    init_logger();

    for _ in 0..20 {
        let n = 1 + random::<usize>() % 6;
        let k = 1 + random::<usize>() % 6;
        let m = 1 + random::<usize>() % 6;
        let a = random_matrix((k, n));
        let b = random_matrix((m, k));
        let expected = explicit_transpose(&a).matmul(&explicit_transpose(&b)).unwrap();

        let mut at = a.clone();
        at.transpose();
        let mut bt = b.clone();
        bt.transpose();
        let actual = at.matmul(&bt).unwrap();
        assert_eq!(actual.dims(), (n, m));
        assert_close!(abs=1e-12, &actual, &expected);

        let mut target = at.clone();
        target.matmul_assign(&bt).unwrap();
        assert!(!target.is_transposed());
        assert_close!(abs=1e-12, &target, &expected);
    }
}

#[test]
fn matrix_vector_agree() {
    let m = random_matrix((5, 4));
    let v = ToyVector::from_data((0..4).map(|_| random::<f64>()).collect());

    let mv = m.mul_vector(&v).unwrap();

    // vᵀ mᵀ is the same numbers as a row
    let mut mt = m.clone();
    mt.transpose();
    let mut vt = v.clone();
    vt.transpose();
    let vm = vt.vecmat(&mt).unwrap();
    assert!(vm.is_transposed());
    assert_close!(abs=1e-12, mv.as_slice(), vm.as_slice());

    for row in 0..5 {
        let row_vec = ToyVector::from_data((0..4).map(|c| m[(row, c)]).collect());
        assert_close!(abs=1e-12, row_vec.dot(&v).unwrap(), mv[row]);
    }
}

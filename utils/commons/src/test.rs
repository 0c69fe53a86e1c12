//! Mock entrypoints for contract unit tests.
use concordium_std::test_infrastructure::MockFn;
use concordium_std::*;
use std::{cell::RefCell, rc::Rc};

/// Mock computing its return value from the parsed parameter, trapping on `None`.
pub fn parse_and_map_mock<D: Deserial, T: Serial, S>(
    f: impl Fn(&D) -> Option<T> + 'static,
) -> MockFn<S> {
    MockFn::new(move |parameter, _, _, _state| {
        let value =
            D::deserial(&mut Cursor::new(parameter)).map_err(|_| CallContractError::Trap)?;
        f(&value)
            .map(|r| (false, Some(r)))
            .ok_or(CallContractError::Trap)
    })
}

/// Mock storing every parsed parameter in `calls`.
pub fn recording_mock<D: Deserial + 'static, S>(calls: Rc<RefCell<Vec<D>>>) -> MockFn<S> {
    MockFn::new(move |parameter, _, _, _state| {
        let value =
            D::deserial(&mut Cursor::new(parameter)).map_err(|_| CallContractError::Trap)?;
        calls.borrow_mut().push(value);
        Ok((false, Some(())))
    })
}

/// Mock of a contract call that always fails.
pub fn failing_mock<S>() -> MockFn<S> {
    MockFn::new(|_, _, _, _state| Err::<(bool, Option<()>), _>(CallContractError::Trap))
}

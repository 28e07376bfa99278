/// Helper macro for reading locked items
///
/// A poisoned lock is recovered, guarded values are only ever replaced as a whole.
///
/// ```rust, ignore
///  let data = read_lock!(my_rwlock);
///  println!("{:?}", data);
/// ```
macro_rules! read_lock {
    ($rwlock:expr) => {
        $rwlock
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    };
}

/// Helper macro for writing to locked items
///
/// ```rust, ignore
///  let mut data = write_lock!(my_rwlock);
///  *data = None;
/// ```
macro_rules! write_lock {
    ($rwlock:expr) => {
        $rwlock
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    };
}

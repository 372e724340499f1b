use std::{fs, marker::PhantomData, path::PathBuf};

/// Filesystem effects that can be undone if staging fails midway.
pub enum RollbackOperation {
    RemoveFile(PathBuf),
    RemoveDir(PathBuf),
}

/// Transaction still accumulating operations.
pub struct Active;
/// Transaction whose effects are final.
pub struct Committed;

/// Tells the `Drop` impl whether pending operations must be undone.
pub trait TransactionState {
    const SHOULD_ROLLBACK: bool;
}
impl TransactionState for Active {
    const SHOULD_ROLLBACK: bool = true;
}
impl TransactionState for Committed {
    const SHOULD_ROLLBACK: bool = false;
}

/// Tracks files and directories created under the staged folder so a failed
/// run can remove them again instead of leaving a half-staged destination.
///
/// Dropping a `Transaction<Active>` rolls back in reverse creation order;
/// calling [`Transaction::commit`] first makes the effects permanent.
pub struct Transaction<State: TransactionState> {
    rollback_operations: Vec<RollbackOperation>,
    state: PhantomData<State>,
}

impl Transaction<Active> {
    pub fn new() -> Self {
        Transaction {
            rollback_operations: vec![],
            state: PhantomData,
        }
    }

    /// Registers an effect to undo if this transaction is dropped
    /// uncommitted.
    pub fn add_operation(&mut self, operation: RollbackOperation) {
        self.rollback_operations.push(operation);
    }

    /// Finalizes the staged files, preventing any rollback.
    pub fn commit(mut self) -> Transaction<Committed> {
        self.rollback_operations.clear();

        Transaction {
            rollback_operations: vec![],
            state: PhantomData,
        }
    }
}

impl Default for Transaction<Active> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: TransactionState> Drop for Transaction<S> {
    fn drop(&mut self) {
        if S::SHOULD_ROLLBACK && !self.rollback_operations.is_empty() {
            log::debug!("...rolling back staged entries");
            while let Some(operation) = self.rollback_operations.pop() {
                match operation {
                    RollbackOperation::RemoveDir(path) => {
                        log::debug!("...removing dir: {}", path.display());
                        let _ = fs::remove_dir_all(&path);
                    }
                    RollbackOperation::RemoveFile(path) => {
                        log::debug!("...removing file: {}", path.display());
                        let _ = fs::remove_file(&path);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uncommitted_transaction_removes_created_entries() {
        let dir = tempfile::tempdir().unwrap();
        let staged = dir.path().join("staged");
        let file = staged.join("copied");

        std::fs::create_dir_all(&staged).unwrap();
        std::fs::write(&file, b"data").unwrap();

        {
            let mut trx = Transaction::<Active>::new();
            trx.add_operation(RollbackOperation::RemoveDir(staged.clone()));
            trx.add_operation(RollbackOperation::RemoveFile(file.clone()));
        }

        assert!(!file.exists());
        assert!(!staged.exists());
    }

    #[test]
    fn committed_transaction_keeps_entries() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("kept");
        std::fs::write(&file, b"data").unwrap();

        let mut trx = Transaction::<Active>::new();
        trx.add_operation(RollbackOperation::RemoveFile(file.clone()));
        let _committed = trx.commit();

        assert!(file.exists());
    }
}

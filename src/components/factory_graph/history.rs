/// Linear undo/redo log.
///
/// Holds an ordered sequence of snapshots and a cursor pointing at the
/// snapshot that reflects the present. Committing after an undo discards
/// everything past the cursor before appending.
#[derive(Clone, Debug)]
pub struct History<T> {
	entries: Vec<T>,
	cursor: Option<usize>,
}

impl<T> Default for History<T> {
	fn default() -> Self {
		Self {
			entries: Vec::new(),
			cursor: None,
		}
	}
}

impl<T: Clone> History<T> {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn commit(&mut self, snapshot: T) {
		let keep = self.cursor.map_or(0, |c| c + 1);
		self.entries.truncate(keep);
		self.entries.push(snapshot);
		self.cursor = Some(self.entries.len() - 1);
	}

	/// Steps back one snapshot and returns it, or `None` at the start.
	pub fn undo(&mut self) -> Option<&T> {
		match self.cursor {
			Some(c) if c > 0 => {
				self.cursor = Some(c - 1);
				self.entries.get(c - 1)
			}
			_ => None,
		}
	}

	/// Steps forward one snapshot and returns it, or `None` at the end.
	pub fn redo(&mut self) -> Option<&T> {
		let next = self.cursor.map_or(0, |c| c + 1);
		if next < self.entries.len() {
			self.cursor = Some(next);
			self.entries.get(next)
		} else {
			None
		}
	}

	pub fn current(&self) -> Option<&T> {
		self.cursor.and_then(|c| self.entries.get(c))
	}

	pub fn can_undo(&self) -> bool {
		matches!(self.cursor, Some(c) if c > 0)
	}

	pub fn can_redo(&self) -> bool {
		self.cursor.map_or(0, |c| c + 1) < self.entries.len()
	}

	pub fn cursor(&self) -> Option<usize> {
		self.cursor
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn empty_history_has_no_cursor() {
		let mut history = History::<u32>::new();
		assert_eq!(history.cursor(), None);
		assert!(history.current().is_none());
		assert!(history.undo().is_none());
		assert!(history.redo().is_none());
	}

	#[test]
	fn undo_and_redo_walk_the_cursor() {
		let mut history = History::new();
		history.commit(1);
		history.commit(2);
		history.commit(3);

		assert_eq!(history.undo(), Some(&2));
		assert_eq!(history.undo(), Some(&1));
		assert_eq!(history.undo(), None);
		assert_eq!(history.cursor(), Some(0));

		assert_eq!(history.redo(), Some(&2));
		assert_eq!(history.redo(), Some(&3));
		assert_eq!(history.redo(), None);
		assert_eq!(history.cursor(), Some(2));
	}

	#[test]
	fn commit_after_undo_discards_the_branch() {
		let mut history = History::new();
		history.commit("a");
		history.commit("b");
		history.commit("c");
		history.undo();
		history.undo();

		history.commit("d");
		assert_eq!(history.len(), 2);
		assert_eq!(history.current(), Some(&"d"));
		assert!(!history.can_redo());
		assert_eq!(history.undo(), Some(&"a"));
	}
}

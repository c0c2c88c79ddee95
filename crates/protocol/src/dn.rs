//! Distinguished name helpers.
//!
//! A DN is a `/`-separated path of relative names, e.g.
//! `org-root/org-web/ls-app01`. Relative names may carry a bracketed naming
//! value such as `block-[00:25:B5:00:00:01]-[00:25:B5:00:00:3F]`; a `/`
//! inside brackets belongs to the RN and does not split the path.

/// Byte offset of the last top-level `/`, if any.
fn last_separator(dn: &str) -> Option<usize> {
	let mut depth = 0usize;
	let mut last = None;
	for (index, byte) in dn.bytes().enumerate() {
		match byte {
			b'[' => depth += 1,
			b']' => depth = depth.saturating_sub(1),
			b'/' if depth == 0 => last = Some(index),
			_ => {}
		}
	}
	last
}

/// Last relative name of `dn`. A DN without separators is its own RN.
pub fn rn(dn: &str) -> &str {
	match last_separator(dn) {
		Some(index) => &dn[index + 1..],
		None => dn,
	}
}

/// DN of the parent, or `None` for a top-level object.
pub fn parent(dn: &str) -> Option<&str> {
	last_separator(dn).map(|index| &dn[..index])
}

/// Appends `rn` to `parent`. An empty parent yields `rn` alone.
pub fn join(parent: &str, rn: &str) -> String {
	let parent = parent.trim_end_matches('/');
	if parent.is_empty() { rn.to_owned() } else { format!("{parent}/{rn}") }
}

/// Relative names of `dn`, root first.
pub fn segments(dn: &str) -> Vec<&str> {
	let mut segments = Vec::new();
	let mut rest = dn;
	while let Some(index) = last_separator(rest) {
		segments.push(&rest[index + 1..]);
		rest = &rest[..index];
	}
	if !rest.is_empty() {
		segments.push(rest);
	}
	segments.reverse();
	segments
}

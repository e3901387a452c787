//! Handle chains.
//!
//! Polylines and inserts own a run of entities (vertices, attributes)
//! recorded only as the first and last handle. The members in between are
//! found by following each member's next link: the next handle when its
//! no-links flag is set, otherwise its stored next-entity reference.

use std::collections::HashSet;

use ahash::RandomState;

use crate::io::dwg::reader::object_reader::{DwgObjectReader, RawObject};
use crate::io::dwg::reference_type::HandleReference;
use crate::io::ByteSource;
use crate::notification::NotificationType;
use crate::types::Handle;

/// First and last member of a chain, resolved against the owner's handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandleChain {
    pub owner: Handle,
    pub first: Handle,
    pub last: Handle,
}

impl HandleChain {
    pub fn new(owner: Handle, first: HandleReference, last: HandleReference) -> Self {
        Self {
            owner,
            first: first.resolve(owner),
            last: last.resolve(owner),
        }
    }

    /// Decode the members in order, the last one included.
    ///
    /// The walk ends early, keeping what it has, when a member fails to
    /// decode, a link is null, a handle comes round again, or `max_steps`
    /// members have been read. Each early end is reported on the reader.
    pub fn walk<S: ByteSource>(
        &self,
        reader: &mut DwgObjectReader<S>,
        handles_only: bool,
        max_steps: usize,
    ) -> Vec<RawObject> {
        let mut members = Vec::new();
        if self.first.is_null() {
            return members;
        }

        let mut visited: HashSet<Handle, RandomState> = HashSet::default();
        let mut current = self.first;

        loop {
            if members.len() >= max_steps {
                self.cut_short(reader, format!("more than {max_steps} members"));
                break;
            }
            if !visited.insert(current) {
                self.cut_short(reader, format!("cycle back to {current:#X}"));
                break;
            }

            let member = match reader.get_object(current, handles_only) {
                Ok(member) => member,
                Err(e) => {
                    self.cut_short(reader, format!("member {current:#X} failed to decode: {e}"));
                    break;
                }
            };
            let next = member.entity().and_then(|e| e.next_link());
            members.push(member);

            if current == self.last {
                break;
            }
            match next {
                Some(handle) => current = handle,
                None => {
                    self.cut_short(reader, format!("null link after {current:#X}"));
                    break;
                }
            }
        }

        members
    }

    fn cut_short<S: ByteSource>(&self, reader: &mut DwgObjectReader<S>, reason: String) {
        reader.notifications_mut().notify_for(
            self.owner,
            NotificationType::Warning,
            format!("Chain {:#X}..{:#X} cut short: {reason}", self.first, self.last),
        );
    }
}

//! Function body parsing.

use tracing::{debug, trace};

use super::names::{unique_name, valid_name};
use super::Parser;
use crate::error::{Result, SymError};
use crate::record::{Class, FuncStart, Record, RecordBody};
use crate::types::{Address, Block, Var};

impl Parser
{
    /// Parse the body records following a `FuncStart` at `pos`.
    ///
    /// Attaches parameters, blocks, locals and the line range to the matching
    /// declaration of the current overlay and returns the position just past
    /// the `FuncEnd`. A second body for a declaration that already has one is
    /// skipped without touching the declaration.
    pub(crate) fn parse_func(&mut self, address: Address, start: &FuncStart, records: &[Record], mut pos: usize) -> Result<usize>
    {
        let overlay = self.overlays.current_mut();
        let name = valid_name(&start.name);
        let mut index = overlay
            .func_index(&name)
            .ok_or_else(|| SymError::UnknownFunction {
                name: name.clone(),
                address,
            })?;
        if overlay.funcs()[index].address != address {
            let unique = unique_name(&name, address);
            index = overlay
                .func_index(&unique)
                .ok_or(SymError::UnknownFunction { name: unique, address })?;
        }

        let func = overlay.func_mut(index);
        if func.has_body() {
            debug!(function = %func.name, address = %address, "skipping duplicate function body");
            return skip_past_func_end(records, pos).ok_or_else(|| SymError::TruncatedFunction {
                name: func.name.clone(),
            });
        }
        func.line_start = start.line;

        // Indices into `func.blocks` of the blocks still open, innermost last.
        let mut open: Vec<usize> = Vec::new();
        while let Some(record) = records.get(pos) {
            pos += 1;
            if let Some(def) = record.as_def() {
                match def.class {
                    Class::Auto | Class::Stat | Class::Reg | Class::Label | Class::Arg | Class::RegParm => {
                        let var = Var::new(def.name, self.types.resolve(def.ty, def.dims, def.tag)?);
                        match open.last() {
                            Some(&block) => func.blocks[block].add_local(var),
                            None => func.signature.add_param(var),
                        }
                    }
                    class => {
                        return Err(SymError::UnsupportedClass {
                            class,
                            context: "function body",
                        })
                    }
                }
                continue;
            }
            match &record.body {
                RecordBody::FuncEnd { line } => {
                    func.line_end = *line;
                    trace!(function = %func.name, blocks = func.blocks.len(), "parsed function body");
                    return Ok(pos);
                }
                RecordBody::BlockStart { line } => {
                    open.push(func.blocks.len());
                    func.blocks.push(Block::new(*line, open.len() - 1));
                }
                RecordBody::BlockEnd { line } => {
                    let block = open.pop().ok_or_else(|| SymError::UnbalancedBlock {
                        function: func.name.clone(),
                        line: *line,
                    })?;
                    func.blocks[block].line_end = *line;
                }
                body => {
                    return Err(SymError::UnsupportedRecordKind {
                        kind: body.kind_name(),
                        context: "function body",
                    })
                }
            }
        }

        Err(SymError::TruncatedFunction {
            name: func.name.clone(),
        })
    }
}

/// Position just past the next `FuncEnd` at or after `pos`.
fn skip_past_func_end(records: &[Record], pos: usize) -> Option<usize>
{
    records
        .get(pos..)?
        .iter()
        .position(|record| matches!(record.body, RecordBody::FuncEnd { .. }))
        .map(|offset| pos + offset + 1)
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn test_skip_past_func_end()
    {
        let records = [
            Record::new(0, RecordBody::BlockStart { line: 2 }),
            Record::new(0, RecordBody::BlockEnd { line: 3 }),
            Record::new(0, RecordBody::FuncEnd { line: 4 }),
            Record::new(0, RecordBody::EndSld),
        ];
        assert_eq!(skip_past_func_end(&records, 0), Some(3));
        assert_eq!(skip_past_func_end(&records, 3), None);
        assert_eq!(skip_past_func_end(&records, 9), None);
    }
}

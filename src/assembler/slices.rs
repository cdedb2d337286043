use crate::ast::Select;
use crate::clause::Slice;

/// Sets LIMIT and OFFSET; a later slice of the same kind wins.
pub struct SliceAssembler {
    query: Select,
}

impl SliceAssembler {
    pub fn new(query: Select) -> Self {
        Self { query }
    }

    pub fn assemble<I>(mut self, slices: I) -> Select
    where
        I: IntoIterator<Item = Slice>,
    {
        for slice in slices {
            self.query = match slice {
                Slice::Limit(n) => self.query.limit(n),
                Slice::Offset(n) => self.query.offset(n),
            };
        }
        self.query
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transpiler::ToSql;

    #[test]
    fn test_offset_before_limit_renders_limit_first() {
        let select = SliceAssembler::new(Select::table("firmware"))
            .assemble([Slice::Offset(20), Slice::Limit(10)]);
        assert_eq!(select.to_sql(), "SELECT * FROM firmware LIMIT 10 OFFSET 20");
    }

    #[test]
    fn test_last_limit_wins() {
        let select = SliceAssembler::new(Select::table("firmware"))
            .assemble([Slice::Limit(10), Slice::Limit(5)]);
        assert_eq!(select.limit, Some(5));
        assert_eq!(select.offset, None);
    }
}

use crate::error::StoreError;

pub const DEFAULT_TABLE: &str = "t1";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Schema {
    /// `c1` auto-increment primary key, `c2` binary id, `c3` label.
    #[default]
    AutoIncrement,
    /// `c2` and `c3` only.
    Simple,
}

/// The fixed demo table the commands create, fill, read and drop.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DemoTable {
    name: String,
    schema: Schema,
}

impl Default for DemoTable {
    fn default() -> Self {
        Self {
            name: DEFAULT_TABLE.to_string(),
            schema: Schema::default(),
        }
    }
}

impl DemoTable {
    /// Table names are spliced into SQL text, so only `[A-Za-z0-9_]` is accepted.
    pub fn new(name: &str, schema: Schema) -> Result<Self, StoreError> {
        let valid = !name.is_empty()
            && name.len() <= 64
            && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
        if !valid {
            return Err(StoreError::InvalidTableName(name.to_string()));
        }
        Ok(Self {
            name: name.to_string(),
            schema,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn schema(&self) -> Schema {
        self.schema
    }

    pub fn create_sql(&self) -> String {
        match self.schema {
            Schema::AutoIncrement => format!(
                "create table {}(c1 int unsigned not null auto_increment primary key, \
                 c2 binary(16), c3 varchar(100))",
                self.name
            ),
            Schema::Simple => format!(
                "create table {}(c2 binary(16), c3 varchar(100))",
                self.name
            ),
        }
    }

    pub fn drop_sql(&self) -> String {
        format!("drop table if exists {}", self.name)
    }

    /// Extended insert of two rows; ids come from the server's `uuid()`.
    pub fn insert_batch_sql(&self) -> String {
        format!(
            "insert into {}(c2, c3) values(unhex(replace(uuid(), '-', '')), 'test1'), \
             (unhex(replace(uuid(), '-', '')), 'test2')",
            self.name
        )
    }

    pub fn select_all_sql(&self) -> String {
        format!("select * from {}", self.name)
    }

    pub fn count_sql(&self) -> String {
        format!("select count(*) as n from {}", self.name)
    }
}

/// Rows added by one `insert_batch_sql` statement.
pub const ROWS_PER_BATCH: i64 = 2;

// RPC server binds to localhost unless told otherwise
pub const DEFAULT_RPC_BIND_ADDRESS: &str = "127.0.0.1:8889";

// Contract accounts owning the tables
pub const FIO_ADDRESS_CONTRACT: &str = "fio.address";
pub const FIO_REQOBT_CONTRACT: &str = "fio.reqobt";

// Tables served by get_table_rows
pub const FIONAMES_TABLE: &str = "fionames";
pub const DOMAINS_TABLE: &str = "domains";
pub const RECORDOBTS_TABLE: &str = "recordobts";

// Rows returned by get_table_rows when no limit is given
pub const DEFAULT_TABLE_ROWS_LIMIT: u32 = 10;

pub const DEFAULT_LOG_FILENAME: &str = "fio-daemon.log";
pub const DEFAULT_LOGS_PATH: &str = "logs/";

// Status of an OBT record once stored
pub const OBT_STATUS_SENT: &str = "sent_to_blockchain";

use soroban_sdk::contracterror;

pub type StrataResult<T = ()> = Result<T, ErrorCode>;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ErrorCode {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    NotAuthorized = 3,

    // Input validation
    ZeroAmount = 10,
    UnsupportedAsset = 11,
    ArrayLengthMismatch = 12,
    InvalidFee = 13,
    InvalidBps = 14,
    InvalidWeights = 15,
    EmptyBatch = 16,
    BatchTooLarge = 17,
    InvalidRoot = 18,
    InvalidMode = 19,
    InvalidPrice = 20,
    InvalidExpiration = 21,
    InvalidDecimals = 22,
    AssetStillHeld = 23,

    // Economic guards
    BelowMinimum = 30,
    SlippageExceeded = 31,
    MaxSlippageExceeded = 32,
    DailyLimitExceeded = 33,
    InsufficientLiquidity = 34,
    ZeroSharesMinted = 35,
    ZeroTotalSupply = 36,
    InsufficientShares = 37,
    InsufficientAllowance = 38,

    // Temporal guards
    RootNotReady = 40,
    NoPendingRoot = 41,
    TooSoonToRebalance = 42,
    NoRebalanceNeeded = 43,

    // Proof guards
    InvalidProof = 50,
    MissingProof = 51,

    // Platform
    OperationPaused = 60,
    ReentrantCall = 61,
    PriceUnavailable = 62,
    NoPriceFeed = 63,
    MathError = 64,
}

//! Static interface of the Amigos contract.
//!
//! One constant per contract function, carrying its input and output types.
//! The adapter only ever calls through these descriptors, so every call
//! site is checked against the ABI before anything is sent.

use crate::abi::AbiType;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutability {
    View,
    NonPayable,
    Payable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContractMethod {
    pub name: &'static str,
    pub inputs: &'static [AbiType],
    pub outputs: &'static [AbiType],
    pub mutability: Mutability,
}

impl ContractMethod {
    /// Function signature as sent to the node, e.g. `register(uint256)`.
    pub fn signature(&self) -> String {
        let params: Vec<&str> = self.inputs.iter().map(|t| t.canonical_name()).collect();
        format!("{}({})", self.name, params.join(","))
    }

    pub fn is_view(&self) -> bool {
        self.mutability == Mutability::View
    }

    pub fn is_payable(&self) -> bool {
        self.mutability == Mutability::Payable
    }
}

use AbiType::{Address, AddressArray, Bool, Uint256};

pub const OWNER: ContractMethod = ContractMethod {
    name: "owner",
    inputs: &[],
    outputs: &[Address],
    mutability: Mutability::View,
};

pub const SERVICE_COMPANY_ADDRESS: ContractMethod = ContractMethod {
    name: "serviceCompanyAddress",
    inputs: &[],
    outputs: &[Address],
    mutability: Mutability::View,
};

pub const UPDATE_SERVICE_ADDRESS: ContractMethod = ContractMethod {
    name: "updateServiceAddress",
    inputs: &[Address],
    outputs: &[],
    mutability: Mutability::NonPayable,
};

pub const REGISTER: ContractMethod = ContractMethod {
    name: "register",
    inputs: &[Uint256],
    outputs: &[],
    mutability: Mutability::NonPayable,
};

pub const ACTIVATE_BASIC_PLAN: ContractMethod = ContractMethod {
    name: "activateBasicPlan",
    inputs: &[],
    outputs: &[],
    mutability: Mutability::Payable,
};

pub const ACTIVATE_MASTER_PLAN: ContractMethod = ContractMethod {
    name: "activateMasterPlan",
    inputs: &[],
    outputs: &[],
    mutability: Mutability::Payable,
};

pub const ACTIVATE_PREMIUM_PLAN: ContractMethod = ContractMethod {
    name: "activatePremiumPlan",
    inputs: &[],
    outputs: &[],
    mutability: Mutability::Payable,
};

pub const CLAIM_DIVIDENDS: ContractMethod = ContractMethod {
    name: "claimDividends",
    inputs: &[],
    outputs: &[],
    mutability: Mutability::NonPayable,
};

pub const BURN_TRX: ContractMethod = ContractMethod {
    name: "burnTRX",
    inputs: &[],
    outputs: &[],
    mutability: Mutability::Payable,
};

/// `(userAddress, sponsor, referralCode, registrationTime, isActive,
/// totalEarned, totalReferrals, basicActive, masterActive, premiumActive,
/// preLaunchActive, preLaunchEndTime)`
pub const GET_USER_INFO: ContractMethod = ContractMethod {
    name: "getUserInfo",
    inputs: &[Address],
    outputs: &[
        Address, Address, Uint256, Uint256, Bool, Uint256, Uint256, Bool, Bool, Bool, Bool,
        Uint256,
    ],
    mutability: Mutability::View,
};

/// `(positionId, upline, children, cycles, isActive)`
pub const GET_USER_MATRIX_INFO: ContractMethod = ContractMethod {
    name: "getUserMatrixInfo",
    inputs: &[Address],
    outputs: &[Uint256, Address, AddressArray, Uint256, Bool],
    mutability: Mutability::View,
};

/// Twelve `uint256` aggregates, see [`super::GlobalStats`].
pub const GET_GLOBAL_STATS: ContractMethod = ContractMethod {
    name: "getGlobalStats",
    inputs: &[],
    outputs: &[Uint256; 12],
    mutability: Mutability::View,
};

pub const GET_USER_REFERRALS: ContractMethod = ContractMethod {
    name: "getUserReferrals",
    inputs: &[Address],
    outputs: &[AddressArray],
    mutability: Mutability::View,
};

pub const IS_QUALIFIED_FOR_DIVIDENDS: ContractMethod = ContractMethod {
    name: "isQualifiedForDividends",
    inputs: &[Address],
    outputs: &[Bool],
    mutability: Mutability::View,
};

pub const USER_ACCUMULATED_DIVIDEND: ContractMethod = ContractMethod {
    name: "userAccumulatedDividend",
    inputs: &[Address],
    outputs: &[Uint256],
    mutability: Mutability::View,
};

pub const DIVIDEND_POOL: ContractMethod = ContractMethod {
    name: "dividendPool",
    inputs: &[],
    outputs: &[Uint256],
    mutability: Mutability::View,
};

pub const TOTAL_QUALIFIED_USERS: ContractMethod = ContractMethod {
    name: "totalQualifiedUsers",
    inputs: &[],
    outputs: &[Uint256],
    mutability: Mutability::View,
};

/// Every function the adapter knows about.
pub const ALL: &[ContractMethod] = &[
    OWNER,
    SERVICE_COMPANY_ADDRESS,
    UPDATE_SERVICE_ADDRESS,
    REGISTER,
    ACTIVATE_BASIC_PLAN,
    ACTIVATE_MASTER_PLAN,
    ACTIVATE_PREMIUM_PLAN,
    CLAIM_DIVIDENDS,
    BURN_TRX,
    GET_USER_INFO,
    GET_USER_MATRIX_INFO,
    GET_GLOBAL_STATS,
    GET_USER_REFERRALS,
    IS_QUALIFIED_FOR_DIVIDENDS,
    USER_ACCUMULATED_DIVIDEND,
    DIVIDEND_POOL,
    TOTAL_QUALIFIED_USERS,
];

// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

#![cfg_attr(not(any(test, feature = "export-abi")), no_main)]

extern crate alloc;

use alloy_sol_types::sol;
use stylus_sdk::{
    alloy_primitives::Address, call::RawCall, function_selector, prelude::*, ArbResult,
};

/// Selector of `masterCopy()`, the one query the proxy answers itself.
const MASTER_COPY_SELECTOR: [u8; 4] = function_selector!("masterCopy");

// The singleton lives in slot 0, the same slot the delegated code is compiled
// to expect. Keeping this field first and alone preserves that alignment.
sol_storage! {
    #[entrypoint]
    pub struct SingletonProxy {
        address singleton;
    }
}

sol! {
    error InvalidSingleton();
}

#[derive(SolidityError)]
pub enum SingletonProxyError {
    InvalidSingleton(InvalidSingleton),
}

// Typed access for contracts that only need the implementation address.
sol_interface! {
    interface IProxy {
        function masterCopy() external view returns (address);
    }
}

#[public]
impl SingletonProxy {
    /// Points the proxy at `singleton`. The address is fixed for the lifetime
    /// of the contract; no setter exists.
    #[constructor]
    pub fn constructor(&mut self, singleton: Address) -> Result<(), SingletonProxyError> {
        if singleton == Address::ZERO {
            return Err(SingletonProxyError::InvalidSingleton(InvalidSingleton {}));
        }
        self.singleton.set(singleton);
        Ok(())
    }

    /// Dispatches every incoming call. A payload starting with the
    /// `masterCopy()` selector is answered locally with the stored address
    /// padded to a 32-byte word. Anything else, including empty payloads and
    /// plain value transfers, runs the singleton's code against this
    /// contract's storage, relaying the returned or reverted bytes untouched.
    #[fallback]
    #[payable]
    pub fn fallback(&mut self, calldata: &[u8]) -> ArbResult {
        if calldata.starts_with(&MASTER_COPY_SELECTOR) {
            return Ok(self.singleton.get().into_word().to_vec());
        }
        self.delegate(calldata)
    }
}

impl SingletonProxy {
    /// Runs the singleton's code in this contract's context, forwarding all
    /// gas. The caller's identity and value stay visible to the delegated
    /// code, and its storage writes land in this contract's slots.
    fn delegate(&mut self, calldata: &[u8]) -> ArbResult {
        let singleton = self.singleton.get();
        unsafe { RawCall::new_delegate(self.vm()).call(singleton, calldata) }
    }
}

//! Crypto Devs NFT collection (ERC-721 Enumerable).
//!
//! ```solidity
//! contract CryptoDevs is ERC721Enumerable, Ownable { ... }
//! ```

use alloy::sol;

sol! {
    #[sol(rpc)]
    interface ICryptoDevs {
        function balanceOf(address owner) external view returns (uint256);
        function tokenOfOwnerByIndex(address owner, uint256 index) external view returns (uint256);
    }
}

#[cfg(test)]
mod tests {
    use alloy::primitives::{Address, U256};
    use alloy::sol_types::SolCall;

    use super::ICryptoDevs;

    #[test]
    fn selectors_match_erc721_enumerable() {
        assert_eq!(ICryptoDevs::balanceOfCall::SELECTOR, [0x70, 0xa0, 0x82, 0x31]);
        assert_eq!(
            ICryptoDevs::tokenOfOwnerByIndexCall::SELECTOR,
            [0x2f, 0x74, 0x5c, 0x59]
        );
    }

    #[test]
    fn enumeration_call_encodes_both_words() {
        let call = ICryptoDevs::tokenOfOwnerByIndexCall {
            owner: Address::repeat_byte(0x11),
            index: U256::from(3),
        };
        let data = call.abi_encode();
        assert_eq!(data.len(), 4 + 32 * 2);
        assert_eq!(data[4 + 32 + 31], 3);
    }
}

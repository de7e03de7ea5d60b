//! Crypto Dev Token sale (ERC-20 + Ownable).
//!
//! ```solidity
//! contract CryptoDevToken is ERC20, Ownable {
//!     uint256 public constant tokenPrice = 0.001 ether;
//!     uint256 public constant tokensPerNFT = 10 * 10**18;
//!     uint256 public constant maxTotalSupply = 10000 * 10**18;
//!     mapping(uint256 => bool) public tokenIdsClaimed;
//!     function mint(uint256 amount) public payable;
//!     function claim() public;
//!     function withdraw() public onlyOwner;
//! }
//! ```

use alloy::sol;

sol! {
    #[sol(rpc)]
    interface ICryptoDevToken {
        function tokenIdsClaimed(uint256 tokenId) external view returns (bool);
        function balanceOf(address account) external view returns (uint256);
        function totalSupply() external view returns (uint256);
        function owner() external view returns (address);

        function mint(uint256 amount) external payable;
        function claim() external;
        function withdraw() external;
    }
}

use alloy::sol;

sol! {
    #[allow(missing_docs)]
    #[sol(rpc)]
    interface DrawingNFT {
        function mint(address to, string calldata uri) external returns (uint256);
        function getCurrentTokenId() external view returns (uint256);
        function totalSupply() external view returns (uint256);
        function owner() external view returns (address);

        event DrawingMinted(address indexed to, uint256 indexed tokenId, string tokenURI);
    }
}

sol! {
    #[allow(missing_docs)]
    #[sol(rpc)]
    interface IdRegistry {
        function custodyOf(uint256 fid) external view returns (address);
    }
}

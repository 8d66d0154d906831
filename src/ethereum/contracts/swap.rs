//! ETH/token swap contract bindings.

use alloy::sol;

// Swap contract interface. Both entry points take the amount in 18-decimal units.
sol! {
    #[sol(rpc)]
    interface ISatSwap {
        function swapFromETHToTokens(uint256 amount) external payable;
        function swapTokensForETH(uint256 amount) external;
    }
}
